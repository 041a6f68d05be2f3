//! Strongly typed row identifiers enforced across the core domain.

// std
use std::num::ParseIntError;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(u64);
		impl $name {
			/// Wraps a raw row identifier.
			pub const fn new(value: u64) -> Self {
				Self(value)
			}

			/// Returns the raw row identifier.
			pub const fn get(self) -> u64 {
				self.0
			}
		}
		impl From<u64> for $name {
			fn from(value: u64) -> Self {
				Self(value)
			}
		}
		impl From<$name> for u64 {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl FromStr for $name {
			type Err = ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.parse().map(Self)
			}
		}
	};
}

def_id! { UserId, "Unique identifier for a registered user.", "User" }
def_id! { PhotoId, "Unique identifier for a photo.", "Photo" }
def_id! { CommentId, "Unique identifier for a comment.", "Comment" }
def_id! { SocialLinkId, "Unique identifier for a social-media link.", "SocialLink" }
def_id! { LikeId, "Unique identifier for a like.", "Like" }
