use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Node-specific modifiers recorded by the post-parse pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// Literal or block was written on one line in the source.
        const SINGLE_LINE = 1 << 0;
        /// Statement was terminated by an explicit `;`.
        const EXPLICIT_SEMICOLON = 1 << 1;
        /// Statement was terminated by automatic semicolon insertion.
        const AUTOMATIC_SEMICOLON = 1 << 2;
        /// Node is a member of an enum body.
        const ENUM_MEMBER = 1 << 3;
        /// Function or class expression was written without a name.
        const OPTIONAL_NAME = 1 << 4;
    }
}

impl Serialize for NodeFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for NodeFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u16::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}
