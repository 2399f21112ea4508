//! Table names of the logical schema. Also used as key prefixes (`feature:<uuid>`).

pub const OWNER: &str = "owner";
pub const ENVIRONMENT: &str = "environment";
pub const FEATURE: &str = "feature";
pub const BINDING: &str = "binding";
