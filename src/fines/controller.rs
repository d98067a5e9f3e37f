use std::collections::HashMap;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::core::library::FineFilter;
use crate::fines::command::list_fines_cmd::{ListFinesCommand, ListFinesCommandRequest, ListFinesCommandResponse};
use crate::fines::command::pay_fine_cmd::{PayFineCommand, PayFineCommandRequest, PayFineCommandResponse};
use crate::fines::factory::create_fine_service;

// `?status=unpaid` hides settled fines, anything else lists all
pub(crate) async fn find_fines(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<ListFinesCommandResponse>, ServerError> {
    let req = ListFinesCommandRequest { filter: FineFilter::from(params.get("status").map(String::as_str)) };
    let res = ListFinesCommand::new(create_fine_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn pay_fine(
    State(state): State<AppState>,
    Path(fine_id): Path<i64>) -> Result<Json<PayFineCommandResponse>, ServerError> {
    let req = PayFineCommandRequest { fine_id };
    let res = PayFineCommand::new(create_fine_service(&state)).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::Json;
    use chrono::Duration;
    use serde_json::json;
    use crate::catalog::controller::add_book;
    use crate::core::controller::AppState;
    use crate::fines::controller::{find_fines, pay_fine};
    use crate::members::controller::add_member;
    use crate::transactions::controller::{borrow_book, return_book};
    use crate::utils::date::testing::FixedClock;

    #[tokio::test]
    async fn test_should_list_and_pay_fines() {
        let clock = Arc::new(FixedClock::new());
        let state = AppState::in_memory("test").with_clock(clock.clone());
        let (_, Json(book)) = add_book(State(state.clone()), Json(json!({"isbn": "ISBN9", "title": "t", "author": "a"})))
            .await.expect("should add book");
        let (_, Json(member)) = add_member(State(state.clone()),
                                           Json(json!({"name": "Ann", "email": "ann@lib.org", "membership_number": "M1"})))
            .await.expect("should add member");
        let (_, Json(borrowed)) = borrow_book(State(state.clone()),
                                              Json(json!({"member_id": member.member.id, "book_id": book.book.id})))
            .await.expect("should borrow");
        clock.advance(Duration::days(16));
        let _ = return_book(State(state.clone()), Path(borrowed.transaction.id)).await.expect("should return");

        let unpaid = HashMap::from([("status".to_string(), "unpaid".to_string())]);
        let Json(listed) = find_fines(State(state.clone()), Query(unpaid.clone())).await.expect("should list fines");
        assert_eq!(1, listed.fines.len());
        assert_eq!(1.0, listed.fines[0].amount);
        let body = serde_json::to_value(&listed).expect("should serialize");
        assert_eq!(json!({"id": member.member.id, "name": "Ann", "email": "ann@lib.org", "membership_number": "M1"}),
                   body[0]["member"]);
        assert_eq!(borrowed.transaction.id, body[0]["transaction"]["id"]);
        assert_eq!(serde_json::to_value(&borrowed).expect("should serialize")["due_date"], body[0]["transaction"]["due_date"]);

        let fine_id = listed.fines[0].id;
        let Json(paid) = pay_fine(State(state.clone()), Path(fine_id)).await.expect("should pay fine");
        assert!(paid.fine.paid_at.is_some());
        let (status, Json(body)) = pay_fine(State(state.clone()), Path(fine_id)).await.expect_err("should reject");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("already paid", body.error.as_str());
        let (status, _) = pay_fine(State(state.clone()), Path(404)).await.expect_err("should be missing");
        assert_eq!(StatusCode::NOT_FOUND, status);

        let Json(listed) = find_fines(State(state.clone()), Query(unpaid)).await.expect("should list fines");
        assert!(listed.fines.is_empty());
        let Json(listed) = find_fines(State(state.clone()), Query(HashMap::new())).await.expect("should list fines");
        assert_eq!(1, listed.fines.len());
    }
}
