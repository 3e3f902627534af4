use serde::Serialize;

/// Help text attached to a SQL function.
///
/// `_FUNC_` in `value` and `extended` is replaced by the function name when
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionDescription {
    pub name: &'static str,
    pub value: &'static str,
    pub extended: &'static str,
}

pub const ACCWEEKDAYS: FunctionDescription = FunctionDescription {
    name: "accweekdays",
    value: "_FUNC_(start_ts, end_ts) - returns the weekday period (unit: second) \
            that starts at start_ts and ends at end_ts",
    extended: "both start_ts and end_ts are unix_timestamp.\n\
               Example:\n   \
               > SELECT _FUNC_(1452149997, 1452150015) FROM src LIMIT 1;\n   \
               18",
};

impl FunctionDescription {
    pub fn usage(&self) -> String {
        self.value.replace("_FUNC_", self.name)
    }

    pub fn extended_usage(&self) -> String {
        self.extended.replace("_FUNC_", self.name)
    }
}
