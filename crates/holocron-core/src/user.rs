//! User records. Users are created outside this service and only read here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:                i64,
  pub email:             String,
  pub subscription_date: DateTime<Utc>,
}
