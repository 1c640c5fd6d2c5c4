//! Membership list codec.
//!
//! A circle's members are persisted as one protobuf message with a single
//! `repeated int64 member_ids = 1` field. The encoder writes the packed form.
//! The decoder also accepts the unpacked form and skips unknown fields, so
//! rows written by other versions of the schema stay readable.
//!
//! A zero-length blob decodes to an empty list: "no members yet" and "record
//! with zero members" cannot be told apart.

use prost::Message;
use trust_core::{TrustResult, UserId};

#[derive(Clone, PartialEq, Message)]
struct MemberList {
    #[prost(int64, repeated, tag = "1")]
    member_ids: Vec<i64>,
}

/// Encodes member ids in order, duplicates included.
#[must_use]
pub fn encode(member_ids: &[UserId]) -> Vec<u8> {
    MemberList {
        member_ids: member_ids.iter().map(|id| id.value()).collect(),
    }
    .encode_to_vec()
}

/// Decodes a stored blob back into member ids.
///
/// Malformed input is a `Decode` error, never a partial list.
pub fn decode(bytes: &[u8]) -> TrustResult<Vec<UserId>> {
    let list = MemberList::decode(bytes)?;
    Ok(list.member_ids.into_iter().map(UserId::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trust_core::TrustError;

    fn ids(raw: &[i64]) -> Vec<UserId> {
        raw.iter().copied().map(UserId::new).collect()
    }

    #[test]
    fn test_empty_blob_is_empty_list() {
        assert!(decode(&[]).unwrap().is_empty());
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn test_single_member_wire_format() {
        assert_eq!(encode(&ids(&[42])), vec![0x0a, 0x01, 0x2a]);
    }

    #[test]
    fn test_members_are_packed_in_order() {
        assert_eq!(encode(&ids(&[42, 43])), vec![0x0a, 0x02, 0x2a, 0x2b]);
        assert_eq!(decode(&[0x0a, 0x02, 0x2a, 0x2b]).unwrap(), ids(&[42, 43]));
    }

    #[test]
    fn test_unpacked_form_is_accepted() {
        assert_eq!(decode(&[0x08, 0x2a, 0x08, 0x2b]).unwrap(), ids(&[42, 43]));
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        // field 2 (varint 5) ahead of field 1
        assert_eq!(decode(&[0x10, 0x05, 0x0a, 0x01, 0x2a]).unwrap(), ids(&[42]));
    }

    #[test]
    fn test_truncated_blob_is_decode_error() {
        let err = decode(&[0x0a, 0x05, 0x2a]).unwrap_err();
        assert!(matches!(err, TrustError::Decode(_)));
    }

    #[test]
    fn test_duplicates_survive() {
        let members = ids(&[7, 7, 3, 7]);
        assert_eq!(decode(&encode(&members)).unwrap(), members);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_round_trip(raw in prop::collection::vec(any::<i64>(), 0..64)) {
            let members = ids(&raw);
            prop_assert_eq!(decode(&encode(&members)).unwrap(), members);
        }

        #[test]
        fn prop_append_then_decode_ends_with_new_member(
            raw in prop::collection::vec(1..i64::MAX, 0..32),
            extra in 1..i64::MAX,
        ) {
            let mut members = decode(&encode(&ids(&raw))).unwrap();
            members.push(UserId::new(extra));
            let decoded = decode(&encode(&members)).unwrap();
            prop_assert_eq!(decoded.len(), raw.len() + 1);
            prop_assert_eq!(decoded.last().copied(), Some(UserId::new(extra)));
        }
    }
}
