use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::user::UserResponse;
use crate::summary::LabelCounts;

/// `GET /users/summary/students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub total_students: i64,
    pub class_counts: BTreeMap<String, i64>,
}

impl From<LabelCounts> for StudentSummary {
    fn from(counts: LabelCounts) -> Self {
        Self {
            total_students: counts.total,
            class_counts: counts.counts,
        }
    }
}

/// `GET /users/summary/admins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub total_admins: i64,
    pub admins: Vec<UserResponse>,
}
