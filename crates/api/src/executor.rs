//! Command and query execution against a Canvas.
//!
//! This module connects the abstract Command/Query types to the actual
//! Canvas implementation, executing operations and returning results.

use crate::{Command, CommandResult, PositionInfo, Query, QueryResult};
use canvas::{Canvas, CanvasError};

/// Execute a command against a canvas.
pub fn execute_command(canvas: &mut Canvas, command: Command) -> CommandResult {
    match command {
        Command::Pan { delta } => match canvas.pan(delta) {
            Ok(()) => CommandResult::success(),
            Err(e) => error_result(e),
        },

        Command::Zoom { pointer, direction } => match canvas.zoom(pointer, direction) {
            Ok(_) => CommandResult::success(),
            Err(e) => error_result(e),
        },

        Command::ZoomBy { factor, center } => {
            let center = center.unwrap_or_default();
            match canvas.zoom_by(center, factor) {
                Ok(_) => CommandResult::success(),
                Err(e) => error_result(e),
            }
        }

        Command::ResetView => {
            canvas.reset_view();
            CommandResult::success()
        }

        Command::AddTable { table } => {
            let id = table.name.clone();
            canvas.add_table(table);
            CommandResult::modified(vec![id])
        }

        Command::RemoveTable { name } => match canvas.remove_table(&name) {
            Ok(_) => CommandResult::removed(vec![name]),
            Err(e) => error_result(e),
        },

        Command::SetPosition { name, position } => match canvas.set_position(&name, position) {
            Ok(()) => CommandResult::modified(vec![name]),
            Err(e) => error_result(e),
        },

        Command::BeginDrag { name } => match canvas.begin_drag(&name) {
            Ok(()) => CommandResult::success(),
            Err(e) => error_result(e),
        },

        Command::UpdateDrag { name, delta } => match canvas.update_drag(&name, delta) {
            Ok(_) => CommandResult::modified(vec![name]),
            Err(e) => error_result(e),
        },

        Command::EndDrag { name, delta } => match canvas.end_drag(&name, delta) {
            Ok(()) => CommandResult::modified(vec![name]),
            Err(e) => error_result(e),
        },

        Command::Input { event } => {
            canvas.handle_input(event);
            CommandResult::success()
        }

        Command::Batch { commands } => {
            let mut all_modified = Vec::new();
            let mut all_removed = Vec::new();

            for cmd in commands {
                match execute_command(canvas, cmd) {
                    CommandResult::Success { modified, removed } => {
                        all_modified.extend(modified);
                        all_removed.extend(removed);
                    }
                    CommandResult::Error { message } => {
                        return CommandResult::error(format!("Batch failed: {}", message));
                    }
                }
            }

            CommandResult::Success {
                modified: all_modified,
                removed: all_removed,
            }
        }
    }
}

/// Execute a query against a canvas.
pub fn execute_query(canvas: &Canvas, query: Query) -> QueryResult {
    match query {
        Query::GetTransform => QueryResult::Transform {
            transform: canvas.transform(),
        },

        Query::GetPosition { name } => QueryResult::Position {
            position: canvas.position(&name),
            name,
        },

        Query::GetPositions => QueryResult::Positions {
            positions: canvas
                .tables()
                .iter()
                .map(|t| PositionInfo {
                    name: t.name.clone(),
                    position: canvas.position(&t.name),
                })
                .collect(),
        },

        Query::GetTables => QueryResult::Tables {
            tables: canvas.tables().to_vec(),
        },

        Query::GetTableCount => QueryResult::Count {
            count: canvas.tables().len(),
        },

        Query::ScreenToCanvas { point } => QueryResult::CanvasPoint {
            point: canvas.viewport().screen_to_canvas(point),
        },

        Query::CanvasToScreen { point } => QueryResult::ScreenPoint {
            point: canvas.viewport().canvas_to_screen(point),
        },

        Query::GetRender => QueryResult::Render {
            snapshot: canvas.render(),
        },
    }
}

/// Process a JSON message (command or query) and return a JSON response.
pub fn process_message(canvas: &mut Canvas, json: &str) -> String {
    // Try to parse as command first
    if let Ok(cmd) = serde_json::from_str::<Command>(json) {
        let result = execute_command(canvas, cmd);
        return to_json(&result);
    }

    // Try to parse as query
    if let Ok(query) = serde_json::from_str::<Query>(json) {
        let result = execute_query(canvas, query);
        return to_json(&result);
    }

    log::debug!("rejected message: {}", json);
    to_json(&CommandResult::error(
        "Invalid JSON: not a valid command or query",
    ))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            "{{\"status\": \"error\", \"message\": \"Serialization failed: {}\"}}",
            e
        )
    })
}

fn error_result(err: CanvasError) -> CommandResult {
    CommandResult::error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas::{DragTarget, InputEvent, ZoomDirection};
    use node::{CanvasPoint, ScreenDelta, ScreenPoint, Table, TableId};

    fn canvas_with(names: &[&str]) -> Canvas {
        let mut canvas = Canvas::default();
        for name in names {
            canvas.add_table(Table::new(*name));
        }
        canvas
    }

    #[test]
    fn drag_commands_move_table() {
        let mut canvas = canvas_with(&["User"]);
        let user = TableId::new("User");
        execute_command(&mut canvas, Command::ZoomBy { factor: 2.0, center: None });

        assert!(execute_command(&mut canvas, Command::BeginDrag { name: user.clone() }).is_success());
        let result = execute_command(
            &mut canvas,
            Command::UpdateDrag {
                name: user.clone(),
                delta: ScreenDelta::new(50.0, 0.0),
            },
        );
        assert_eq!(result, CommandResult::modified(vec![user.clone()]));

        match execute_query(&canvas, Query::GetPosition { name: user }) {
            QueryResult::Position { position, .. } => {
                assert_eq!(position, CanvasPoint::new(25.0, 0.0))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stale_update_command_reports_error() {
        let mut canvas = canvas_with(&["User"]);
        let result = execute_command(
            &mut canvas,
            Command::UpdateDrag {
                name: TableId::new("User"),
                delta: ScreenDelta::new(1.0, 1.0),
            },
        );
        assert!(matches!(result, CommandResult::Error { ref message } if message.contains("Stale")));
    }

    #[test]
    fn stale_input_event_succeeds_silently() {
        let mut canvas = canvas_with(&["User"]);
        let result = execute_command(
            &mut canvas,
            Command::Input {
                event: InputEvent::DragMove {
                    target: DragTarget::Table(TableId::new("User")),
                    delta: ScreenDelta::new(1.0, 1.0),
                },
            },
        );
        assert!(result.is_success());
        assert_eq!(canvas.position(&TableId::new("User")), CanvasPoint::ORIGIN);
    }

    #[test]
    fn degenerate_zoom_reports_error() {
        let mut canvas = Canvas::default();
        let result = execute_command(&mut canvas, Command::ZoomBy { factor: 0.0, center: None });
        assert!(!result.is_success());
        assert_eq!(canvas.transform().scale, 1.0);
    }

    #[test]
    fn batch_collects_and_stops_on_error() {
        let mut canvas = Canvas::default();
        let result = execute_command(
            &mut canvas,
            Command::Batch {
                commands: vec![
                    Command::AddTable { table: Table::new("User") },
                    Command::AddTable { table: Table::new("Post") },
                    Command::RemoveTable { name: TableId::new("Post") },
                ],
            },
        );
        assert_eq!(
            result,
            CommandResult::Success {
                modified: vec![TableId::new("User"), TableId::new("Post")],
                removed: vec![TableId::new("Post")],
            }
        );

        let result = execute_command(
            &mut canvas,
            Command::Batch {
                commands: vec![
                    Command::RemoveTable { name: TableId::new("Ghost") },
                    Command::Pan { delta: ScreenDelta::new(5.0, 5.0) },
                ],
            },
        );
        assert!(matches!(result, CommandResult::Error { ref message } if message.starts_with("Batch failed")));
        assert_eq!(canvas.transform().offset, ScreenDelta::ZERO);
    }

    #[test]
    fn positions_follow_table_order() {
        let mut canvas = canvas_with(&["User", "Post"]);
        canvas
            .set_position(&TableId::new("Post"), CanvasPoint::new(3.0, 4.0))
            .unwrap();
        match execute_query(&canvas, Query::GetPositions) {
            QueryResult::Positions { positions } => {
                assert_eq!(positions.len(), 2);
                assert_eq!(positions[0].name.as_str(), "User");
                assert_eq!(positions[1].position, CanvasPoint::new(3.0, 4.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn conversion_queries_use_viewport() {
        let mut canvas = Canvas::default();
        canvas.pan(ScreenDelta::new(10.0, 20.0)).unwrap();
        canvas.zoom_by(ScreenPoint::new(10.0, 20.0), 2.0).unwrap();

        match execute_query(&canvas, Query::ScreenToCanvas { point: ScreenPoint::new(30.0, 40.0) }) {
            QueryResult::CanvasPoint { point } => assert_eq!(point, CanvasPoint::new(10.0, 10.0)),
            other => panic!("unexpected {:?}", other),
        }
        match execute_query(&canvas, Query::CanvasToScreen { point: CanvasPoint::new(10.0, 10.0) }) {
            QueryResult::ScreenPoint { point } => assert_eq!(point, ScreenPoint::new(30.0, 40.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn process_message_handles_commands_and_queries() {
        let mut canvas = Canvas::default();
        let response = process_message(&mut canvas, r#"{ "type": "pan", "delta": [10, -5] }"#);
        assert_eq!(response, r#"{"status":"success"}"#);

        let response = process_message(
            &mut canvas,
            r#"{ "type": "zoom", "pointer": [100, 100], "direction": "in" }"#,
        );
        assert_eq!(response, r#"{"status":"success"}"#);

        let response = process_message(&mut canvas, r#"{ "type": "get_transform" }"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["type"], "transform");
        let scale = value["transform"]["scale"].as_f64().unwrap();
        assert!((scale - 1.1).abs() < 1e-5);
        let offset = value["transform"]["offset"].as_array().unwrap();
        assert!((offset[0].as_f64().unwrap() - 1.0).abs() < 1e-4);
        assert!((offset[1].as_f64().unwrap() + 15.5).abs() < 1e-4);
    }

    #[test]
    fn process_message_rejects_unknown_json() {
        let mut canvas = Canvas::default();
        let response = process_message(&mut canvas, r#"{ "type": "explode" }"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["status"], "error");

        let response = process_message(&mut canvas, "not json");
        assert!(response.contains("error"));
    }

    #[test]
    fn zoom_direction_command_matches_wheel_event() {
        let mut by_command = Canvas::default();
        let mut by_wheel = Canvas::default();
        let pointer = ScreenPoint::new(64.0, 32.0);

        execute_command(
            &mut by_command,
            Command::Zoom {
                pointer,
                direction: ZoomDirection::Out,
            },
        );
        execute_command(
            &mut by_wheel,
            Command::Input {
                event: InputEvent::Wheel { pointer, delta_y: 120.0 },
            },
        );
        assert_eq!(by_command.transform(), by_wheel.transform());
    }

    #[test]
    fn overflowing_pan_is_rejected_and_transform_stays_finite() {
        let mut canvas = Canvas::default();
        process_message(&mut canvas, r#"{ "type": "pan", "delta": [10, 0] }"#);

        let response = process_message(&mut canvas, r#"{ "type": "pan", "delta": [1e39, 0] }"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value["message"].as_str().unwrap().contains("Non-finite"));

        process_message(&mut canvas, r#"{ "type": "pan", "delta": [-1e39, 0] }"#);
        assert_eq!(canvas.transform().offset, ScreenDelta::new(10.0, 0.0));

        let response = process_message(&mut canvas, r#"{ "type": "get_transform" }"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        let state: canvas::ViewportState =
            serde_json::from_value(value["transform"].clone()).unwrap();
        assert_eq!(state.offset, ScreenDelta::new(10.0, 0.0));
    }

    #[test]
    fn non_finite_set_position_is_rejected() {
        let mut canvas = canvas_with(&["User"]);
        let result = execute_command(
            &mut canvas,
            Command::SetPosition {
                name: TableId::new("User"),
                position: CanvasPoint::new(f32::INFINITY, 0.0),
            },
        );
        assert!(!result.is_success());
        assert_eq!(canvas.position(&TableId::new("User")), CanvasPoint::ORIGIN);
    }
}
