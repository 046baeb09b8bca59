/// Distinct identifiers a single query may track before it gives up.
pub const DEFAULT_CAPACITY: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Column widths of the consolidated summary table.
pub const TABLE_ID_WIDTH: usize = 4;
pub const TABLE_NAME_WIDTH: usize = 14;
pub const TABLE_MEAL_WIDTH: usize = 14;
pub const TABLE_NUMBER_WIDTH: usize = 8;

/// Minimum jaro-winkler score before a meal type is offered as a suggestion.
pub const MEAL_SUGGESTION_THRESHOLD: f64 = 0.8;
