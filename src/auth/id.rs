//! Strongly typed partner identifiers used for the `iss` and `aud` claims.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Partner identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Partner identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Partner identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Platform-issued identifier of a merchant, ISV, or payment institution.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartnerId(String);
impl PartnerId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for PartnerId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for PartnerId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for PartnerId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<PartnerId> for String {
	fn from(value: PartnerId) -> Self {
		value.0
	}
}
impl TryFrom<String> for PartnerId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for PartnerId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for PartnerId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Partner({})", self.0)
	}
}
impl Display for PartnerId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn partner_ids_reject_blank_and_whitespace() {
		assert_eq!(PartnerId::new(""), Err(IdentifierError::Empty));
		assert!(PartnerId::new(" pm001").is_err(), "Leading whitespace must be rejected.");
		assert_eq!(PartnerId::new("pm 001"), Err(IdentifierError::ContainsWhitespace));

		let id = PartnerId::new("pm001").expect("Partner fixture should be considered valid.");

		assert_eq!(id.as_str(), "pm001");
		assert_eq!(format!("{id:?}"), "Partner(pm001)");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: PartnerId =
			serde_json::from_str("\"isv-42\"").expect("Partner should deserialize successfully.");

		assert_eq!(id.as_ref(), "isv-42");
		assert!(serde_json::from_str::<PartnerId>("\"with space\"").is_err());
	}

	#[test]
	fn length_limit_is_inclusive() {
		PartnerId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Exact length should succeed.");

		assert_eq!(
			PartnerId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<PartnerId, u8> = HashMap::from_iter([(
			PartnerId::new("pm001").expect("Partner used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("pm001"), Some(&7));
	}
}
