use std::rc::Rc;

use desk_api_bridge::{BridgeConfig, DeskApiBridge, RelayStop};
use desk_api_contract::{DeskApiErrorKind, DeskEvent, MessageSender};
use desk_host::{
    DeskApiCapabilities, DeskHostServices, EventPort, MemoryDeskService, MemoryEventPort,
    MemoryNotificationService,
};
use futures::{executor::block_on, join};
use serde_json::{json, Value};

struct Harness {
    host: MemoryDeskService,
    tray: MemoryNotificationService,
    bridge: DeskApiBridge,
}

fn harness(config: BridgeConfig) -> Harness {
    let host = MemoryDeskService::with_desks([
        desk_api_contract::Desk::named("home", "Home"),
        desk_api_contract::Desk::named("work", "Work"),
    ]);
    let tray = MemoryNotificationService::default();
    let bridge = DeskApiBridge::new(
        DeskHostServices::new(
            Rc::new(host.clone()),
            Rc::new(tray.clone()),
            DeskApiCapabilities::all_available(),
        ),
        config,
    );
    Harness { host, tray, bridge }
}

fn send(bridge: &DeskApiBridge, message: Value) -> Value {
    let response = block_on(bridge.on_message_external(message, &MessageSender::from_tab(3)))
        .expect("recognized request");
    serde_json::to_value(response).expect("serialize response")
}

#[test]
fn lookup_requests_answer_with_camel_case_operands() {
    let h = harness(BridgeConfig::default());

    assert_eq!(
        send(&h.bridge, json!({"messageType": "GetActiveDesk"})),
        json!({"messageType": "OperationSuccess", "operands": {"deskUuid": "home"}})
    );
    assert_eq!(
        send(
            &h.bridge,
            json!({"messageType": "GetDeskByID", "operands": {"deskId": "work"}})
        ),
        json!({
            "messageType": "OperationSuccess",
            "operands": {"deskUuid": "work", "deskName": "Work"}
        })
    );
}

#[test]
fn active_desk_is_idempotent_across_requests() {
    let h = harness(BridgeConfig::default());
    let first = send(&h.bridge, json!({"messageType": "GetActiveDesk"}));
    let second = send(&h.bridge, json!({"messageType": "GetActiveDesk"}));
    assert_eq!(first, second);
}

#[test]
fn contradictory_remove_answers_failure_without_side_effects() {
    let h = harness(BridgeConfig::default());

    let response = send(
        &h.bridge,
        json!({
            "messageType": "RemoveDesk",
            "operands": {"deskId": "work", "options": {"allowUndo": true, "combineDesks": true}}
        }),
    );

    assert_eq!(response["messageType"], "OperationFailure");
    assert_eq!(
        response["errorMessage"],
        "allowUndo and combineDesks can not be set at the same time"
    );
    assert!(h.host.calls().is_empty());
    assert!(h.tray.created().is_empty());
}

#[test]
fn remove_without_desk_id_answers_not_found() {
    let h = harness(BridgeConfig::default());
    let response = send(&h.bridge, json!({"messageType": "RemoveDesk", "operands": {}}));
    assert_eq!(response["errorMessage"], "desk can not be found");
    assert!(h.host.calls().is_empty());
}

#[test]
fn confirmed_remove_uses_configured_notification_id() {
    let config = BridgeConfig::from_toml_str(
        r#"
        [confirmation]
        notification_id = "prompt"
        accept_label = "Remove"
        "#,
    )
    .expect("config");
    let h = harness(config);
    let sender = MessageSender::default();

    let (response, delivered) = block_on(async {
        join!(
            h.bridge.on_message_external(
                json!({"messageType": "RemoveDesk", "operands": {"deskId": "work"}}),
                &sender,
            ),
            async { h.tray.click("prompt", 0) }
        )
    });

    assert!(delivered);
    assert_eq!(
        serde_json::to_value(response.expect("recognized")).expect("serialize"),
        json!({"messageType": "OperationSuccess", "operands": []})
    );
    assert_eq!(h.tray.created()[0].1.buttons[0], "Remove");
    assert_eq!(h.host.call_count("removeDesk"), 1);
}

#[test]
fn declined_remove_answers_cancellation_failure() {
    let h = harness(BridgeConfig::default());
    let sender = MessageSender::default();

    let (response, _) = block_on(async {
        join!(
            h.bridge.on_message_external(
                json!({"messageType": "RemoveDesk", "operands": {"deskId": "work"}}),
                &sender,
            ),
            async { h.tray.click("desk_removal_confirmation", 1) }
        )
    });

    let response = serde_json::to_value(response.expect("recognized")).expect("serialize");
    assert_eq!(response["messageType"], "OperationFailure");
    assert_eq!(
        response["errorMessage"],
        "User cancelled desk removal operation"
    );
    assert_eq!(h.host.call_count("removeDesk"), 0);
}

#[test]
fn unknown_message_type_is_not_answered() {
    let h = harness(BridgeConfig::default());
    let err = block_on(h.bridge.on_message_external(
        json!({"messageType": "RenameDesk", "operands": {"deskId": "work"}}),
        &MessageSender::default(),
    ))
    .expect_err("protocol violation");
    assert_eq!(err.kind(), DeskApiErrorKind::Protocol);
}

#[test]
fn connected_port_receives_lifecycle_events_including_undo() {
    let h = harness(BridgeConfig::default());
    let port = MemoryEventPort::default();
    let port_obj: Rc<dyn EventPort> = Rc::new(port.clone());
    let relay = h.bridge.on_connect_external(port_obj).expect("connect");

    send(
        &h.bridge,
        json!({"messageType": "LaunchDesk", "operands": {"deskName": "Focus"}}),
    );
    send(
        &h.bridge,
        json!({"messageType": "SwitchDesk", "operands": {"deskId": "desk-3"}}),
    );
    send(
        &h.bridge,
        json!({
            "messageType": "RemoveDesk",
            "operands": {"deskId": "work", "skipConfirmation": true, "options": {"allowUndo": true}}
        }),
    );
    assert!(h.host.undo_removal("work"));
    h.host.close_event_streams();

    let summary = block_on(relay.run());
    assert_eq!(summary.stop, RelayStop::HostClosed);

    let posted: Vec<Value> = port
        .posted()
        .iter()
        .map(|event: &DeskEvent| serde_json::to_value(event).expect("serialize event"))
        .collect();
    assert_eq!(
        posted,
        vec![
            json!({"eventName": "DeskAdded", "data": {"deskId": "desk-3"}}),
            json!({
                "eventName": "DeskSwitched",
                "data": {"activated": "desk-3", "deactivated": "home"}
            }),
            json!({"eventName": "DeskRemoved", "data": {"deskId": "work"}}),
            json!({"eventName": "DeskUndone", "data": {"deskId": "work"}}),
        ]
    );
}
