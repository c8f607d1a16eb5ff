use thiserror::Error;

/// Which attribute list a face corner refers into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Texcoord => "texcoord",
            Attribute::Normal => "normal",
        })
    }
}

/// Errors produced while parsing OBJ text. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum ObjError {
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: missing {what}")]
    MissingComponent { line: usize, what: &'static str },

    #[error("line {line}: malformed face corner '{token}'")]
    MalformedCorner { line: usize, token: String },

    #[error("line {line}: face has {corners} corners, only triangles are supported")]
    NonTriangularFace { line: usize, corners: usize },

    #[error("line {line}: OBJ indices are 1-based, found 0")]
    ZeroIndex { line: usize },

    #[error("line {line}: relative index {index} is not supported")]
    RelativeIndex { line: usize, index: i64 },

    #[error("line {line}: {attribute} index {index} out of range ({count} declared)")]
    IndexOutOfRange {
        line: usize,
        attribute: Attribute,
        index: i64,
        count: usize,
    },

    #[error("line {line}: texcoord has {found} components, expected {expected}")]
    TexcoordWidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("too many unique vertices (>{})", u32::MAX)]
    TooManyVertices,

    #[error("OBJ contained no triangles")]
    NoTriangles,
}
