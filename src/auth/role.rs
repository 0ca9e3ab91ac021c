//! Closed set of partner roles recognised by the platform.

// self
use crate::_prelude::*;

/// Role a partner signs as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerRole {
	/// Merchant signing for itself.
	Merchant,
	/// Intermediary that may act on behalf of merchants under delegated authorization.
	Isv,
	/// Payment institution signing for itself.
	PaymentInstitution,
}
impl PartnerRole {
	/// Returns a stable label suitable for span fields, metrics, and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			PartnerRole::Merchant => "merchant",
			PartnerRole::Isv => "isv",
			PartnerRole::PaymentInstitution => "payment_institution",
		}
	}

	/// Returns `true` when the role may sign on behalf of a merchant.
	pub const fn can_delegate(self) -> bool {
		matches!(self, PartnerRole::Isv)
	}
}
impl Display for PartnerRole {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
