//! Deterministic JSON text form used to bind a request body to a token.
//!
//! Object members are sorted by key (byte order) at every nesting level, array order is kept,
//! and the output carries no insignificant whitespace or slash escaping. The writer sorts keys
//! itself so the result does not depend on whether `serde_json`'s `preserve_order` feature is
//! enabled elsewhere in the build graph.

mod guard;

// self
use crate::{_prelude::*, error::SerializationError};

/// Sorted-key text form of a JSON value. Only ever used for digesting and for the exact bytes
/// transmitted alongside the token that embeds its digest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalDocument(String);
impl CanonicalDocument {
	/// Returns the canonical text.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the UTF-8 bytes that are digested.
	pub fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}

	/// Consumes the document and returns the canonical text.
	pub fn into_string(self) -> String {
		self.0
	}
}
impl AsRef<str> for CanonicalDocument {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for CanonicalDocument {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Canonicalizes an already parsed JSON value.
pub fn canonicalize_value(value: &Value) -> Result<CanonicalDocument, SerializationError> {
	let mut buf = String::new();

	write_value(&mut buf, value)?;

	Ok(CanonicalDocument(buf))
}

/// Canonicalizes any serializable value.
///
/// Non-finite floats are rejected before conversion, and values that cannot become a JSON
/// document (such as maps with non-string keys) surface as [`SerializationError::Json`]. Both
/// name the path of the failing member.
pub fn canonicalize<T>(value: &T) -> Result<CanonicalDocument, SerializationError>
where
	T: ?Sized + Serialize,
{
	guard::ensure_finite(value)?;

	let value = serde_path_to_error::serialize(value, serde_json::value::Serializer).map_err(|e| {
		let path = e.path().to_string();

		SerializationError::Json { path, source: e.into_inner() }
	})?;

	canonicalize_value(&value)
}

fn write_value(buf: &mut String, value: &Value) -> Result<(), SerializationError> {
	match value {
		Value::Null => buf.push_str("null"),
		Value::Bool(true) => buf.push_str("true"),
		Value::Bool(false) => buf.push_str("false"),
		Value::Number(number) => buf.push_str(&number.to_string()),
		Value::String(text) => buf.push_str(&quote(text)?),
		Value::Array(items) => {
			buf.push('[');

			for (idx, item) in items.iter().enumerate() {
				if idx > 0 {
					buf.push(',');
				}

				write_value(buf, item)?;
			}

			buf.push(']');
		},
		Value::Object(members) => {
			let mut sorted = members.iter().collect::<Vec<_>>();

			sorted.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
			buf.push('{');

			for (idx, (key, member)) in sorted.into_iter().enumerate() {
				if idx > 0 {
					buf.push(',');
				}

				buf.push_str(&quote(key)?);
				buf.push(':');
				write_value(buf, member)?;
			}

			buf.push('}');
		},
	}

	Ok(())
}

fn quote(text: &str) -> Result<String, SerializationError> {
	serde_json::to_string(text)
		.map_err(|source| SerializationError::Json { path: SerializationError::ROOT.into(), source })
}
