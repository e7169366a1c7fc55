use std::fmt;

use serde::{Deserialize, Serialize};

/// Authorization tier of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Elevated role: may create, update and delete tasks
    #[serde(rename = "TL")]
    TeamLead,
    /// Base role: may view tasks and toggle their completion
    #[serde(rename = "EMPLOYEE")]
    Employee,
}

impl Role {
    pub fn is_elevated(self) -> bool {
        self == Role::TeamLead
    }

    /// Role name shown next to the user's ID
    pub fn label(self) -> &'static str {
        match self {
            Role::TeamLead => "Team Lead",
            Role::Employee => "Employee",
        }
    }

    /// Short access badge, e.g. "TL Access"
    pub fn badge(self) -> &'static str {
        match self {
            Role::TeamLead => "TL Access",
            Role::Employee => "Employee Access",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::TeamLead => write!(f, "TL"),
            Role::Employee => write!(f, "EMPLOYEE"),
        }
    }
}

/// The authenticated actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
}

impl Session {
    pub fn new(role: Role, employee_id: impl Into<String>) -> Self {
        Session {
            role,
            employee_id: employee_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_json_shape() {
        let s = Session::new(Role::TeamLead, "TL1001");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"role":"TL","employeeId":"TL1001"}"#);
        let back: Session = serde_json::from_str(r#"{"role":"EMPLOYEE","employeeId":"EMP2001"}"#)
            .unwrap();
        assert_eq!(back, Session::new(Role::Employee, "EMP2001"));
    }

    #[test]
    fn only_team_lead_is_elevated() {
        assert!(Role::TeamLead.is_elevated());
        assert!(!Role::Employee.is_elevated());
    }
}
