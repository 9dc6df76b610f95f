//! Decoding real response bodies into the model shapes.

use codec::envelope::{decode, decode_slice, encode};
use codec::CodecError;
use model::{PaginatedList, Ticket, TicketId, UserId};
use serde_json::json;

fn ticket(id: &str, user: Option<&str>) -> Ticket {
    Ticket {
        id: TicketId::new(id).unwrap(),
        user_id: user.map(|u| UserId::new(u).unwrap()),
    }
}

#[test]
fn ticket_entry_response() {
    let decoded: Ticket =
        decode_slice(br#"{"entry":{"id":"1234","userId":"dummyUser"}}"#).unwrap();

    assert_eq!(decoded.id.as_str(), "1234");
    assert_eq!(decoded.user_id.as_ref().map(UserId::as_str), Some("dummyUser"));
}

#[test]
fn ticket_list_response_preserves_order() {
    let decoded: PaginatedList<Ticket> =
        decode_slice(br#"{"list":{"entries":[{"entry":{"id":"1234"}},{"entry":{"id":"9876"}}]}}"#)
            .unwrap();

    let ids: Vec<&str> = decoded.entries.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1234", "9876"]);
    assert!(decoded.entries.iter().all(|t| t.user_id.is_none()));
}

#[test]
fn ticket_list_with_zero_one_and_many_entries() {
    for count in [0_usize, 1, 5] {
        let entries: Vec<_> = (0..count)
            .map(|i| json!({"entry": {"id": format!("T{i}"), "userId": "u"}}))
            .collect();
        let list: PaginatedList<Ticket> = decode(json!({"list": {"entries": entries}})).unwrap();

        assert_eq!(list.entries.len(), count);
        for (i, t) in list.entries.iter().enumerate() {
            assert_eq!(t.id.as_str(), format!("T{i}"));
        }
    }
}

#[test]
fn ticket_with_superfluous_field_is_rejected() {
    let err = decode_slice::<Ticket>(
        br#"{"entry":{"id":"1234","userId":"dummyUser"},"superflous":"value"}"#,
    )
    .unwrap_err();

    assert!(matches!(err, CodecError::UnexpectedField { ref field, .. } if field == "superflous"));
    assert!(err.to_string().contains("Ticket"));
}

#[test]
fn ticket_with_non_entry_field_is_rejected() {
    let err =
        decode_slice::<Ticket>(br#"{"nonEntry":{"id":"1234","userId":"dummyUser"}}"#).unwrap_err();
    assert!(matches!(err, CodecError::MissingWrapper { shape: "Ticket", .. }));
}

#[test]
fn element_without_entry_fails_list_decode() {
    let err = decode::<PaginatedList<Ticket>>(json!({
        "list": {"entries": [{"entry": {"id": "1"}}, {"id": "2"}]}
    }))
    .unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { shape: "PaginatedList", .. }));
}

#[test]
fn duplicated_entry_is_never_silently_dropped() {
    let err = decode_slice::<Ticket>(br#"{"entry":{"id":"first"},"entry":{"id":"second"}}"#)
        .unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedField { ref field, .. } if field == "entry"));

    let err = decode_slice::<PaginatedList<Ticket>>(
        br#"{"list":{"entries":[{"entry":{"id":"1"}},{"entry":{"id":"2"},"entry":{"id":"3"}}]}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { shape: "PaginatedList", .. }));
}

#[test]
fn ticket_list_encodes_with_both_layers() {
    let list = PaginatedList::new(vec![ticket("1", Some("a")), ticket("2", None)]);
    assert_eq!(
        encode(&list).unwrap(),
        json!({
            "list": {
                "entries": [
                    {"entry": {"id": "1", "userId": "a"}},
                    {"entry": {"id": "2"}}
                ]
            }
        })
    );
}

#[test]
fn encoded_list_decodes_to_equal_value() {
    let list = PaginatedList::new(vec![ticket("1", Some("a")), ticket("2", Some("b"))]);
    let decoded: PaginatedList<Ticket> = decode(encode(&list).unwrap()).unwrap();
    assert_eq!(decoded, list);
}
