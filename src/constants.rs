/// Column names of the per-visit nurse CSV export.
/// The bracketed suffixes come from the export's join naming and are part of the header.
pub const COL_NURSE_ID: &str = "nurse_id";
pub const COL_GENDER: &str = "gender";
pub const COL_NAME: &str = "name";
pub const COL_MOBILITY: &str = "mobility";
pub const COL_MUNICIPALITY: &str = "municipality";
pub const COL_UPDATED_AT: &str = "updated_at[nurse_nurse]";
pub const COL_STATUS: &str = "status";
pub const COL_IS_ACTIVE: &str = "is_active";
pub const COL_IS_PROFILE_UPDATED: &str = "is_profile_updated";
pub const COL_IS_ONBOARDING_COMPLETED: &str = "is_onboarding_completed";
pub const COL_IS_APPROVED: &str = "is_approved[nurse_nurse]";
pub const COL_TREATMENT_TYPE: &str = "treatment_type";

/// Every column a visit CSV must carry, in export order.
pub const VISIT_COLUMNS: [&str; 12] = [
    COL_NURSE_ID,
    COL_GENDER,
    COL_NAME,
    COL_MOBILITY,
    COL_MUNICIPALITY,
    COL_UPDATED_AT,
    COL_STATUS,
    COL_IS_ACTIVE,
    COL_IS_PROFILE_UPDATED,
    COL_IS_ONBOARDING_COMPLETED,
    COL_IS_APPROVED,
    COL_TREATMENT_TYPE,
];

/// Value the export uses for a set flag.
pub const FLAG_TRUE: &str = "1";

// Name sheet columns
pub const COL_SHEET_ID: &str = "id";
pub const COL_SHEET_FIRST_NAME: &str = "first_name";
pub const COL_SHEET_LAST_NAME: &str = "last_name";

pub const PLACEHOLDER_ID_PREFIX: &str = "nurse-";
pub const PLACEHOLDER_FIRST_NAME: &str = "אחות";

pub const GENDER_FEMALE: &str = "FEMALE";
pub const GENDER_MALE: &str = "MALE";

pub const MOBILITY_OPTIONS: [&str; 5] = [
    "INDEPENDENT",
    "WALKING_CANE",
    "WHEELCHAIR",
    "WALKER",
    "BEDRIDDEN",
];
pub const STATUS_OPTIONS: [&str; 2] = ["CLOSED", "CANCELLED"];
pub const LANGUAGE_OPTIONS: [&str; 5] = ["HEBREW", "ENGLISH", "RUSSIAN", "ARABIC", "AMHARIC"];
pub const AVAILABILITY_DAYS: [&str; 5] = [
    "2024-01-15",
    "2024-01-16",
    "2024-01-17",
    "2024-01-18",
    "2024-01-19",
];

/// Engine packages whose sample data feeds the aggregator by default.
pub const DEFAULT_ENGINES: [&str; 3] = ["basic", "fuzzy", "azure-gpt"];

/// Timestamp format used for `updatedAt` on enriched profiles.
pub const ENRICHED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// ISO-8601 local timestamp with microseconds used by the quality report.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
