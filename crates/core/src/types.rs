/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Calendar dates (birthdays, release dates) carry no time component.
pub type Date = chrono::NaiveDate;
