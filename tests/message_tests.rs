use ddpio::message::{InboundMessage, OutboundMessage};
use serde_json::json;

#[test]
fn test_decode_connect_ignores_extra_fields() {
    let msg = InboundMessage::from_json_str(r#"{"msg":"connect","version":"1","support":["1","pre2"],"id":7}"#)
        .unwrap();
    assert_eq!(msg, InboundMessage::Connect);
}

#[test]
fn test_decode_ping_with_and_without_id() {
    assert_eq!(
        InboundMessage::from_json_str(r#"{"msg":"ping","id":"42"}"#).unwrap(),
        InboundMessage::Ping {
            id: Some("42".to_string())
        }
    );
    assert_eq!(
        InboundMessage::from_json_str(r#"{"msg":"ping"}"#).unwrap(),
        InboundMessage::Ping { id: None }
    );
}

#[test]
fn test_empty_ping_id_is_treated_as_absent() {
    let msg = InboundMessage::from_json_str(r#"{"msg":"ping","id":""}"#).unwrap();
    assert_eq!(msg, InboundMessage::Ping { id: None });

    let InboundMessage::Ping { id } = msg else {
        panic!("expected a ping");
    };
    assert_eq!(
        serde_json::to_value(OutboundMessage::pong(id)).unwrap(),
        json!({"msg": "pong"})
    );
}

#[test]
fn test_decode_method_keeps_params_in_order() {
    let msg = InboundMessage::from_json_slice(
        br#"{"msg":"method","id":"1","method":"add","params":[1,2.5,"x",null,{"k":[true]}]}"#,
    )
    .unwrap();

    assert_eq!(
        msg,
        InboundMessage::Method {
            id: "1".to_string(),
            method: "add".to_string(),
            params: vec![json!(1), json!(2.5), json!("x"), json!(null), json!({"k": [true]})],
        }
    );
}

#[test]
fn test_decode_method_without_params_has_empty_params() {
    let msg = InboundMessage::from_json_str(r#"{"msg":"method","id":"1","method":"now"}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::Method {
            id: "1".to_string(),
            method: "now".to_string(),
            params: vec![],
        }
    );
}

#[test]
fn test_uncorrelatable_method_is_unknown() {
    for text in [
        r#"{"msg":"method","method":"add","params":[]}"#,
        r#"{"msg":"method","id":"1","params":[]}"#,
        r#"{"msg":"method","id":"1","method":"add","params":{"a":1}}"#,
    ] {
        let msg = InboundMessage::from_json_str(text).unwrap();
        assert_eq!(
            msg,
            InboundMessage::Unknown {
                msg: Some("method".to_string())
            },
            "{text}"
        );
    }
}

#[test]
fn test_unrecognized_tags_decode_as_unknown() {
    assert_eq!(
        InboundMessage::from_json_str(r#"{"msg":"sub","id":"1","name":"x"}"#).unwrap(),
        InboundMessage::Unknown {
            msg: Some("sub".to_string())
        }
    );
    assert_eq!(
        InboundMessage::from_json_str(r#"{"server_id":"0"}"#).unwrap(),
        InboundMessage::Unknown { msg: None }
    );
}

#[test]
fn test_invalid_frames_fail_to_decode() {
    assert!(InboundMessage::from_json_str("").is_err());
    assert!(InboundMessage::from_json_str("not json").is_err());
    assert!(InboundMessage::from_json_str("\"ping\"").is_err());
    assert!(InboundMessage::from_json_slice(&[0xff, 0xfe]).is_err());
}

#[test]
fn test_outbound_wire_shapes() {
    assert_eq!(
        serde_json::to_value(OutboundMessage::connected("abc")).unwrap(),
        json!({"msg": "connected", "session": "abc"})
    );
    assert_eq!(
        serde_json::to_value(OutboundMessage::result("1", json!({"sum": 3}))).unwrap(),
        json!({"msg": "result", "id": "1", "result": {"sum": 3}})
    );
    assert_eq!(
        serde_json::to_value(OutboundMessage::error("1", "bad params")).unwrap(),
        json!({"msg": "result", "id": "1", "error": {"error": "bad params"}})
    );
    assert_eq!(
        serde_json::to_value(OutboundMessage::updated("1")).unwrap(),
        json!({"msg": "updated", "methods": ["1"]})
    );
}

#[test]
fn test_null_result_is_still_present() {
    let text = OutboundMessage::result("n", json!(null)).to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"msg": "result", "id": "n", "result": null}));
}
