//! Accessor naming conventions
//!
//! Maps a method name and shape to the property it accesses:
//!
//! | Shape                                  | Kind   | Example                     |
//! |----------------------------------------|--------|-----------------------------|
//! | `get*`, no parameters                  | getter | `getFirstName` → `firstName`|
//! | `is*`, no parameters, boolean return   | getter | `isActive` → `active`       |
//! | `set*`, one parameter                  | setter | `setAge` → `age`            |
//!
//! Names shorter than four characters are never accessors.

const GET_PREFIX: &str = "get";
const SET_PREFIX: &str = "set";
const IS_PREFIX: &str = "is";

const MIN_ACCESSOR_LEN: usize = 4;

/// Accessor kind and the property it is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Reads the named property
    Getter(String),
    /// Writes the named property
    Setter(String),
}

impl Accessor {
    /// Name of the accessed property
    pub fn property_name(&self) -> &str {
        match self {
            Accessor::Getter(name) | Accessor::Setter(name) => name,
        }
    }
}

/// Classify a method by name, parameter count and return shape
///
/// `returns_boolean` must be true when the declared return type is
/// boolean-shaped; it gates the `is` prefix.
pub fn classify(name: &str, param_count: usize, returns_boolean: bool) -> Option<Accessor> {
    if name.chars().count() < MIN_ACCESSOR_LEN {
        return None;
    }

    let get_prefix = name.starts_with(GET_PREFIX);
    let is_prefix = name.starts_with(IS_PREFIX) && returns_boolean;
    let getter = param_count == 0 && (get_prefix || is_prefix);
    let setter = param_count == 1 && name.starts_with(SET_PREFIX);

    if getter {
        let prefix_len = if is_prefix { IS_PREFIX.len() } else { GET_PREFIX.len() };
        Some(Accessor::Getter(decapitalize(&name[prefix_len..])))
    } else if setter {
        Some(Accessor::Setter(decapitalize(&name[SET_PREFIX.len()..])))
    } else {
        None
    }
}

/// Lower-case the first character of `s`
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
