pub mod branch_name;
pub mod reference_set;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f=]";

/// Names that would collide with the reserved HEAD key or the detached sentinel
pub const RESERVED_NAMES: [&str; 2] = ["HEAD", "None"];
