// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ticket rendering and download tests.

use axum::http::{header, StatusCode};
use party_rsvp::ticket::layout::{
    MessageFit, CANVAS_HEIGHT, CANVAS_WIDTH, MESSAGE_BOTTOM, NAME_MAX_LINES,
};
use party_rsvp::ticket::{TicketRenderer, TicketText};
use tower::ServiceExt;

mod common;

fn awkward_names() -> Vec<String> {
    vec![
        String::new(),
        "Evan Fonseca".to_string(),
        "x".repeat(60),
        "Nombre MUY LARGO para probar que nunca se salga del recuadro blanco aunque tenga muchas palabras".to_string(),
        "Ñandú Pérez Müller".to_string(),
    ]
}

#[test]
fn test_render_has_fixed_dimensions_for_any_name() {
    let renderer = TicketRenderer::new(None);
    for name in awkward_names() {
        for (adults, kids) in [(0, 1), (30, 30), (2, 3)] {
            let ticket = renderer.render(&name, adults, kids).unwrap();
            assert_eq!(ticket.width(), CANVAS_WIDTH, "{name}");
            assert_eq!(ticket.height(), CANVAS_HEIGHT, "{name}");
        }
    }
}

#[test]
fn test_plan_keeps_message_above_footer() {
    let renderer = TicketRenderer::new(None);
    for name in awkward_names() {
        let plan = renderer.plan(&name, 30, 30).unwrap();
        assert!(plan.name_lines.len() <= NAME_MAX_LINES);
        assert!(!plan.message.lines.is_empty(), "{name}");
        for line in &plan.message.lines {
            assert!(line.baseline <= MESSAGE_BOTTOM, "{name}");
        }
    }
}

#[test]
fn test_two_line_name_keeps_message() {
    let renderer = TicketRenderer::bundled();
    let plan = renderer
        .plan("Ana María Guadalupe de los Ángeles Fernández", 2, 1)
        .unwrap();
    assert_eq!(plan.name_lines.len(), 2);
    assert_eq!(plan.message.fit, MessageFit::Clamped);
    assert_eq!(plan.message.lines.len(), 1);
    assert!(plan.message.lines[0].text.starts_with("We have reserved 3"));
    assert!(plan.message.lines[0].baseline <= MESSAGE_BOTTOM);
}

#[test]
fn test_huge_counts_do_not_overflow() {
    let plan = TicketRenderer::bundled().plan("Evan", u32::MAX, 1).unwrap();
    assert_eq!(plan.kids_box.number.text, "1");
}

#[test]
fn test_file_name_from_slug() {
    let ticket = TicketRenderer::bundled()
        .render("Familia Gómez Dávila !!!", 1, 1)
        .unwrap();
    assert_eq!(ticket.file_name, "ticket-familia-gomez-davila.png");

    let ticket = TicketRenderer::bundled().render("  ", 1, 0).unwrap();
    assert_eq!(ticket.file_name, "ticket-guest.png");
}

#[tokio::test]
async fn test_ticket_endpoint_returns_png() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_post(
            "/api/ticket",
            r#"{"name":"Mixtli Omar Fonseca Vega","adults":2,"kids":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"ticket-mixtli-fonseca.png\""
    );

    let png = common::body_bytes(response).await;
    let image = image::load_from_memory(&png).unwrap();
    assert_eq!((image.width(), image.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[tokio::test]
async fn test_ticket_endpoint_clamps_counts() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_post(
            "/api/ticket",
            r#"{"name":"Evan Fonseca Gonzalez","adults":4294967295,"kids":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"ticket-evan-fonseca.png\""
    );
}

#[tokio::test]
async fn test_ticket_endpoint_validates() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_post(
            "/api/ticket",
            r#"{"name":"","adults":0,"kids":0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("Name is required."));
    assert!(details.contains("You must reserve at least 1 place"));
}

#[test]
fn test_custom_text_reaches_plan() {
    let renderer = TicketRenderer::bundled().with_text(TicketText {
        title: "Ana's Party".to_string(),
        message_template: "{places} seats are yours.".to_string(),
        ..TicketText::default()
    });

    let plan = renderer.plan("Ana", 1, 2).unwrap();
    assert_eq!(plan.title.text, "Ana's Party");
    assert_eq!(plan.message.lines[0].text, "3 seats are yours.");
}
