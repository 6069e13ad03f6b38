//! Fixtures for tests against [`MockDeckTransport`].

use futures_util::future::{self, BoxFuture, FutureExt};
use mockall::{Sequence, predicate::eq};
use serde_json::{Value, json};

use super::error::{DeckError, DeckResult};
use super::api::DeckApi;
use super::transport::{MockDeckTransport, Namespace, RemoteRequest};

pub fn ok(value: Value) -> BoxFuture<'static, DeckResult<Value>> {
    future::ready(Ok(value)).boxed()
}

pub fn remote_error(status: u16, body: &str) -> BoxFuture<'static, DeckResult<Value>> {
    let body = body.to_string();
    future::ready(Err(DeckError::Remote { status, body })).boxed()
}

/// Expect `request` exactly once, in order, answered with `response`.
pub fn expect(
    mock: &mut MockDeckTransport,
    seq: &mut Sequence,
    request: RemoteRequest,
    response: Value,
) {
    mock.expect_send()
        .with(eq(request))
        .times(1)
        .in_sequence(seq)
        .returning(move |_| ok(response.clone()));
}

/// Expect `request` exactly once, in order, failing with a remote status.
pub fn expect_failure(
    mock: &mut MockDeckTransport,
    seq: &mut Sequence,
    request: RemoteRequest,
    status: u16,
    body: &'static str,
) {
    mock.expect_send()
        .with(eq(request))
        .times(1)
        .in_sequence(seq)
        .returning(move |_| remote_error(status, body));
}

/// Expect the board listing followed by the stack listings of the first
/// `scanned` boards, in order. Each board is `(board_id, [(stack_id, [card_ids])])`.
pub fn expect_walk(
    mock: &mut MockDeckTransport,
    seq: &mut Sequence,
    boards: &[(u64, Vec<(u64, Vec<u64>)>)],
    scanned: usize,
) {
    expect(
        mock,
        seq,
        RemoteRequest::get(Namespace::Rest, "/boards"),
        board_list(boards),
    );
    for (board_id, stacks) in boards.iter().take(scanned) {
        expect(
            mock,
            seq,
            RemoteRequest::get(Namespace::Rest, format!("/boards/{board_id}/stacks")),
            stack_list(*board_id, stacks),
        );
    }
}

pub fn board_list(boards: &[(u64, Vec<(u64, Vec<u64>)>)]) -> Value {
    boards
        .iter()
        .map(|(id, _)| json!({ "id": id, "title": format!("Board {id}") }))
        .collect()
}

pub fn stack_list(board_id: u64, stacks: &[(u64, Vec<u64>)]) -> Value {
    stacks
        .iter()
        .map(|(stack_id, cards)| {
            let cards: Vec<Value> = cards
                .iter()
                .map(|card_id| {
                    json!({
                        "id": card_id,
                        "title": format!("Card {card_id}"),
                        "stackId": stack_id,
                    })
                })
                .collect();
            json!({
                "id": stack_id,
                "title": format!("Stack {stack_id}"),
                "boardId": board_id,
                "cards": cards,
            })
        })
        .collect()
}

/// Ordered call script: each step is expected exactly once, in order.
pub struct Script {
    mock: MockDeckTransport,
    seq: Sequence,
}

impl Script {
    pub fn new() -> Self {
        Self {
            mock: MockDeckTransport::new(),
            seq: Sequence::new(),
        }
    }

    pub fn then(mut self, request: RemoteRequest, response: Value) -> Self {
        expect(&mut self.mock, &mut self.seq, request, response);
        self
    }

    pub fn then_fail(mut self, request: RemoteRequest, status: u16, body: &'static str) -> Self {
        expect_failure(&mut self.mock, &mut self.seq, request, status, body);
        self
    }

    /// Board listing, then the stack listings of the first `scanned` boards.
    pub fn walk(mut self, boards: &[(u64, Vec<(u64, Vec<u64>)>)], scanned: usize) -> Self {
        expect_walk(&mut self.mock, &mut self.seq, boards, scanned);
        self
    }

    pub fn api(self) -> DeckApi<MockDeckTransport> {
        DeckApi::new(self.mock)
    }
}
