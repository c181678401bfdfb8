/// Execution result codes reported by the scheduler, with their labels.
pub const JOB_STATUS_LABELS: &[(&str, &str)] = &[
    ("COMPLETED", "Completed"),
    ("FAILED", "Failed"),
    ("RUNNING", "Running"),
];

/// Codes are chosen so neither contains the other; select filters match by
/// substring.
pub const ACTIVE_STATUS_LABELS: &[(&str, &str)] = &[("ENABLED", "Active"), ("DISABLED", "Inactive")];

pub const TASK_GROUPS: &[&str] = &[
    "STOCK",
    "STOCK_SCHEDULE",
    "STOCK_REPORT",
    "REPORT_SCHEDULE",
    "MAINTENANCE_SCHEDULE",
    "DEFAULT",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn code(self) -> &'static str {
        match self {
            ActiveStatus::Active => "ENABLED",
            ActiveStatus::Inactive => "DISABLED",
        }
    }
}

/// Page key of the job management grid; job launches update its rows.
pub const JOB_PAGE_KEY: &str = "Job Management";
