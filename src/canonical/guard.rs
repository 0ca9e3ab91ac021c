//! Validating serializer that walks a value and rejects non-finite floats.
//!
//! `serde_json` silently renders NaN and infinities as `null`, which would let a body that is
//! not representable in JSON reach the digest. The guard visits every node first and reports the
//! problem instead, naming the path of the offending member.

// crates.io
use serde::ser::{
	SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
	SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
// self
use crate::{_prelude::*, error::SerializationError};

type GuardResult = Result<(), SerializationError>;

macro_rules! accept {
	($($method:ident: $ty:ty),* $(,)?) => {
		$(
			fn $method(self, _: $ty) -> GuardResult {
				Ok(())
			}
		)*
	};
}

/// Walks `value` and fails on the first non-finite number.
pub(crate) fn ensure_finite<T>(value: &T) -> GuardResult
where
	T: ?Sized + Serialize,
{
	serde_path_to_error::serialize(value, FiniteGuard).map_err(|e| {
		let path = e.path().to_string();

		e.into_inner().at(path)
	})
}

#[derive(Clone, Copy)]
struct FiniteGuard;
impl FiniteGuard {
	fn check(finite: bool) -> GuardResult {
		if finite {
			Ok(())
		} else {
			Err(SerializationError::NonFiniteNumber { path: SerializationError::ROOT.into() })
		}
	}
}
impl Serializer for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();
	type SerializeMap = Self;
	type SerializeSeq = Self;
	type SerializeStruct = Self;
	type SerializeStructVariant = Self;
	type SerializeTuple = Self;
	type SerializeTupleStruct = Self;
	type SerializeTupleVariant = Self;

	accept! {
		serialize_bool: bool,
		serialize_i8: i8,
		serialize_i16: i16,
		serialize_i32: i32,
		serialize_i64: i64,
		serialize_i128: i128,
		serialize_u8: u8,
		serialize_u16: u16,
		serialize_u32: u32,
		serialize_u64: u64,
		serialize_u128: u128,
		serialize_char: char,
		serialize_str: &str,
		serialize_bytes: &[u8],
		serialize_unit_struct: &'static str,
	}

	fn serialize_f32(self, v: f32) -> GuardResult {
		Self::check(v.is_finite())
	}

	fn serialize_f64(self, v: f64) -> GuardResult {
		Self::check(v.is_finite())
	}

	fn serialize_none(self) -> GuardResult {
		Ok(())
	}

	fn serialize_some<T>(self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_unit(self) -> GuardResult {
		Ok(())
	}

	fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> GuardResult {
		Ok(())
	}

	fn serialize_newtype_struct<T>(self, _: &'static str, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_newtype_variant<T>(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		value: &T,
	) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_seq(self, _: Option<usize>) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_tuple(self, _: usize) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_tuple_struct(
		self,
		_: &'static str,
		_: usize,
	) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_tuple_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_map(self, _: Option<usize>) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, SerializationError> {
		Ok(self)
	}

	fn serialize_struct_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self, SerializationError> {
		Ok(self)
	}
}
impl SerializeSeq for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_element<T>(&mut self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeTuple for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_element<T>(&mut self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeTupleStruct for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_field<T>(&mut self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeTupleVariant for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_field<T>(&mut self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeMap for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_key<T>(&mut self, key: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		key.serialize(*self)
	}

	fn serialize_value<T>(&mut self, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeStruct for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}
impl SerializeStructVariant for FiniteGuard {
	type Error = SerializationError;
	type Ok = ();

	fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> GuardResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(*self)
	}

	fn end(self) -> GuardResult {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Serialize)]
	struct TrData {
		amount: f64,
	}

	#[derive(Serialize)]
	struct Payment {
		#[serde(rename = "trData")]
		tr_data: TrData,
	}

	struct Memo;
	impl Serialize for Memo {
		fn serialize<S>(&self, _: S) -> Result<S::Ok, S::Error>
		where
			S: serde::Serializer,
		{
			Err(serde::ser::Error::custom("memo is not encodable"))
		}
	}

	#[derive(Serialize)]
	struct Note {
		memo: Memo,
	}

	#[derive(Serialize)]
	struct Quote {
		amount: f64,
		legs: Vec<Option<f32>>,
	}

	#[test]
	fn finite_values_pass() {
		let quote = Quote { amount: 10.5, legs: vec![Some(1.0), None] };

		ensure_finite(&quote).expect("Finite floats should be accepted.");
	}

	#[test]
	fn nested_non_finite_values_fail() {
		let quote = Quote { amount: 1.0, legs: vec![None, Some(f32::INFINITY)] };

		assert!(matches!(ensure_finite(&quote), Err(SerializationError::NonFiniteNumber { .. })));
		assert!(matches!(
			ensure_finite(&f64::NAN),
			Err(SerializationError::NonFiniteNumber { path }) if path == "."
		));
	}

	#[test]
	fn non_finite_errors_name_the_member() {
		let err = ensure_finite(&Payment { tr_data: TrData { amount: f64::NAN } })
			.expect_err("NaN amount should be rejected.");

		assert!(matches!(&err, SerializationError::NonFiniteNumber { path } if path == "trData.amount"));
		assert!(err.to_string().contains("trData.amount"));
	}

	#[test]
	fn custom_failures_carry_the_member_path() {
		let err = ensure_finite(&Note { memo: Memo })
			.expect_err("Failing member should be reported.");

		assert!(matches!(
			err,
			SerializationError::Custom { path, message }
				if path == "memo" && message == "memo is not encodable"
		));
	}
}
