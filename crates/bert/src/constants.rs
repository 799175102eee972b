//! External Term Format wire constants.

/// Leading version byte of every encoded term.
pub const FORMAT_VERSION: u8 = 131;

/// Width of the fixed ASCII field carried by [`TermTag::FloatText`].
pub const FLOAT_TEXT_LEN: usize = 31;

/// Tag bytes understood by [`crate::TermDecoder`].
///
/// Any byte not listed here takes the lenient unrecognized-tag path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TermTag {
    NewFloat = 70,
    SmallInteger = 97,
    Integer = 98,
    FloatText = 99,
    Atom = 100,
    SmallTuple = 104,
    LargeTuple = 105,
    Nil = 106,
    Charlist = 107,
    List = 108,
    Binary = 109,
    SmallBignum = 110,
    LargeBignum = 111,
    SmallAtom = 115,
    Map = 116,
    AtomUtf8 = 118,
    SmallAtomUtf8 = 119,
}

impl TryFrom<u8> for TermTag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            70 => TermTag::NewFloat,
            97 => TermTag::SmallInteger,
            98 => TermTag::Integer,
            99 => TermTag::FloatText,
            100 => TermTag::Atom,
            104 => TermTag::SmallTuple,
            105 => TermTag::LargeTuple,
            106 => TermTag::Nil,
            107 => TermTag::Charlist,
            108 => TermTag::List,
            109 => TermTag::Binary,
            110 => TermTag::SmallBignum,
            111 => TermTag::LargeBignum,
            115 => TermTag::SmallAtom,
            116 => TermTag::Map,
            118 => TermTag::AtomUtf8,
            119 => TermTag::SmallAtomUtf8,
            other => return Err(other),
        })
    }
}
