//! Runtime type lattice
//!
//! The IR tracks a coarse set of runtime tags per value. A `RuntimeType` is
//! a set of those tags: the empty set is the bottom (`NO_TYPE`), the full set
//! is the top (`UNKNOWN`), and `join` is set union, which makes it
//! associative, commutative and idempotent with `NO_TYPE` as identity.

use std::fmt;

/// A set of runtime type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuntimeType(u16);

impl RuntimeType {
    /// Bottom: no value has been seen
    pub const NO_TYPE: RuntimeType = RuntimeType(0);
    pub const UNDEFINED: RuntimeType = RuntimeType(1 << 0);
    pub const NULL: RuntimeType = RuntimeType(1 << 1);
    pub const BOOLEAN: RuntimeType = RuntimeType(1 << 2);
    pub const STRING: RuntimeType = RuntimeType(1 << 3);
    pub const NUMBER: RuntimeType = RuntimeType(1 << 4);
    pub const BIGINT: RuntimeType = RuntimeType(1 << 5);
    pub const CLOSURE: RuntimeType = RuntimeType(1 << 6);
    pub const OBJECT: RuntimeType = RuntimeType(1 << 7);
    /// Top: any runtime value
    pub const UNKNOWN: RuntimeType = RuntimeType((1 << 8) - 1);

    const NAMED: [(RuntimeType, &'static str); 8] = [
        (Self::UNDEFINED, "undefined"),
        (Self::NULL, "null"),
        (Self::BOOLEAN, "boolean"),
        (Self::STRING, "string"),
        (Self::NUMBER, "number"),
        (Self::BIGINT, "bigint"),
        (Self::CLOSURE, "closure"),
        (Self::OBJECT, "object"),
    ];

    /// Least upper bound of two types
    pub fn join(self, other: RuntimeType) -> RuntimeType {
        RuntimeType(self.0 | other.0)
    }

    /// Check if every tag of `other` is also in `self`
    pub fn contains(self, other: RuntimeType) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_no_type(self) -> bool {
        self.0 == 0
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    /// Number of distinct tags in the set
    pub fn tag_count(self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_no_type() {
            return write!(f, "notype");
        }
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        let mut first = true;
        for (tag, name) in Self::NAMED {
            if self.contains(tag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}
