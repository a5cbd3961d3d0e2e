/// A configuration field that may not have been written yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stored<T> {
	/// The field holds a value
	Present(T),
	/// The field was never written
	Absent,
}

/// Returned by [Stored::required] for an absent field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not configured yet")]
pub struct MissingFieldError(pub &'static str);

impl<T> Stored<T> {
	/// Checks if the field holds a value
	pub fn is_present(&self) -> bool {
		matches!(self, Stored::Present(_))
	}

	/// Converts into [Option], [Stored::Absent] becoming [None]
	pub fn into_option(self) -> Option<T> {
		match self {
			Stored::Present(value) => Some(value),
			Stored::Absent => None,
		}
	}

	/// Borrows the stored value
	pub fn as_ref(&self) -> Stored<&T> {
		match self {
			Stored::Present(value) => Stored::Present(value),
			Stored::Absent => Stored::Absent,
		}
	}

	/// Maps the stored value, keeping [Stored::Absent] as is
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stored<U> {
		match self {
			Stored::Present(value) => Stored::Present(f(value)),
			Stored::Absent => Stored::Absent,
		}
	}

	/// Returns the value, or an error naming `field` when it is absent
	pub fn required(self, field: &'static str) -> Result<T, MissingFieldError> {
		self.into_option().ok_or(MissingFieldError(field))
	}
}

impl<T> Default for Stored<T> {
	fn default() -> Self {
		Stored::Absent
	}
}

impl<T> From<Option<T>> for Stored<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(value) => Stored::Present(value),
			None => Stored::Absent,
		}
	}
}

impl<T> From<Stored<T>> for Option<T> {
	fn from(value: Stored<T>) -> Self {
		value.into_option()
	}
}
