//! Comment-preserving JSON value tree

/// Kind of a retained comment token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// A comment retained from the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Text between the comment delimiters, verbatim
    pub text: String,
    /// Whether the comment shared a line with the value before it
    pub inline: bool,
}

impl Comment {
    /// An own-line block comment with the given text
    pub fn block(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Block,
            text: text.into(),
            inline: false,
        }
    }
}

/// Structural position a comment is anchored to within a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Inside the container, before any child; the only position in an
    /// empty container
    Leading,
    /// Immediately before the child at this index
    Before(usize),
    /// Immediately after the child at this index
    After(usize),
}

/// A comment together with its structural anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredComment {
    pub anchor: Anchor,
    pub comment: Comment,
}

/// A JSON value that keeps comments and raw scalar spellings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `true`, `false`, `null` or a number, exactly as spelled in the source
    Literal(String),
    /// A string, raw lexeme including the surrounding quotes
    Str(String),
    Array(Array),
    Object(Object),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    pub items: Vec<Value>,
    /// Source-ordered comments, each tied to a structural anchor
    pub comments: Vec<AnchoredComment>,
}

/// An object member; the key is kept as its raw quoted lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub entries: Vec<Entry>,
    pub comments: Vec<AnchoredComment>,
}

/// A parsed document: the root value plus any comments outside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDocument {
    pub leading: Vec<Comment>,
    pub root: Value,
    pub trailing: Vec<Comment>,
}

impl Value {
    /// Build a string value from unescaped text
    pub fn string(text: &str) -> Self {
        Value::Str(encode_string(text))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Comment-free projection for semantic comparison
    pub fn to_plain(&self) -> serde_json::Value {
        match self {
            Value::Literal(raw) => serde_json::from_str(raw).unwrap_or(serde_json::Value::Null),
            Value::Str(raw) => serde_json::Value::String(decode_string(raw)),
            Value::Array(array) => {
                serde_json::Value::Array(array.items.iter().map(Value::to_plain).collect())
            }
            Value::Object(object) => serde_json::Value::Object(
                object
                    .entries
                    .iter()
                    .map(|entry| (entry.key_name(), entry.value.to_plain()))
                    .collect(),
            ),
        }
    }
}

impl Entry {
    /// Decoded key text
    pub fn key_name(&self) -> String {
        decode_string(&self.key)
    }
}

impl Object {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key_name() == key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key_name() == key)
            .map(|entry| &mut entry.value)
    }

    /// Append an entry, encoding the key as a string lexeme
    pub fn push(&mut self, key: &str, value: Value) {
        self.entries.push(Entry {
            key: encode_string(key),
            value,
        });
    }
}

/// Encode text as a JSON string lexeme, including the quotes
pub(crate) fn encode_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode a string lexeme back into its text
pub(crate) fn decode_string(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    let chars: Vec<char> = inner.chars().collect();
    let mut out = String::with_capacity(inner.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escape) = chars.get(i) else { break };
        i += 1;
        match escape {
            '"' | '\\' | '/' => out.push(escape),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let high = hex4(&chars, i);
                i += 4;
                let code = if (0xD800..0xDC00).contains(&high)
                    && chars.get(i) == Some(&'\\')
                    && chars.get(i + 1) == Some(&'u')
                {
                    let low = hex4(&chars, i + 2);
                    if (0xDC00..0xE000).contains(&low) {
                        i += 6;
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    } else {
                        high
                    }
                } else {
                    high
                };
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => out.push(other),
        }
    }
    out
}

fn hex4(chars: &[char], at: usize) -> u32 {
    chars
        .get(at..at + 4)
        .map(|digits| {
            digits
                .iter()
                .fold(0, |acc, c| acc * 16 + c.to_digit(16).unwrap_or(0))
        })
        .unwrap_or(0)
}
