//! The contact page: single owner of form and post-list state.
//!
//! The view sends [`ViewEvent`]s and re-renders from [`PageSnapshot`]s.
//! Requests run on spawned tasks and report back as [`Completion`]s through a
//! channel; applying them is the only path that writes their outcomes.

use std::{future::Future, sync::Arc};

use serde::Serialize;
use shared::domain::{Field, Post};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    config::Settings, error::TransportError, form::FormController, posts::PostsLoader,
    transport::PostsTransport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FieldChanged { field: Field, value: String },
    FieldTouched { field: Field },
    SubmitClicked,
}

#[derive(Debug)]
pub enum Completion {
    Submitted {
        request: RequestId,
        result: Result<(), TransportError>,
    },
    Loaded {
        request: RequestId,
        result: Result<Vec<Post>, TransportError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub field: Field,
    pub value: String,
    pub show_error: bool,
    /// Violation messages, empty unless `show_error` is set.
    pub errors: Vec<String>,
}

/// Read-only render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub submitted: bool,
    pub submit_success: bool,
    pub fields: Vec<FieldSnapshot>,
    pub loading: bool,
    pub posts: Vec<Post>,
    pub load_error: Option<String>,
    pub submit_error: Option<String>,
}

impl PageSnapshot {
    pub fn field(&self, field: Field) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.field == field)
    }
}

fn build_snapshot(form: &FormController, posts: &PostsLoader) -> PageSnapshot {
    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            let show_error = form.should_show_error(field);
            let errors = if show_error {
                form.errors(field).iter().map(ToString::to_string).collect()
            } else {
                Vec::new()
            };
            FieldSnapshot {
                field,
                value: form.value(field).to_string(),
                show_error,
                errors,
            }
        })
        .collect();

    PageSnapshot {
        submitted: form.submitted(),
        submit_success: form.submit_success(),
        fields,
        loading: posts.loading(),
        posts: posts.posts().to_vec(),
        load_error: posts.load_error().map(str::to_string),
        submit_error: form.submit_error().map(str::to_string),
    }
}

pub struct ContactPage {
    form: FormController,
    posts: PostsLoader,
    transport: Arc<dyn PostsTransport>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    snapshots: watch::Sender<PageSnapshot>,
    next_request: u64,
    in_flight: usize,
}

impl ContactPage {
    /// Builds the page and issues the initial read-request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(transport: Arc<dyn PostsTransport>, settings: &Settings) -> Self {
        let form = FormController::new();
        let posts = PostsLoader::new(settings.posts_page_size);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(build_snapshot(&form, &posts));

        let mut page = Self {
            form,
            posts,
            transport,
            completion_tx,
            completion_rx,
            snapshots,
            next_request: 0,
            in_flight: 0,
        };
        page.load();
        page
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn posts(&self) -> &PostsLoader {
        &self.posts
    }

    /// Number of requests issued whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn snapshot(&self) -> PageSnapshot {
        build_snapshot(&self.form, &self.posts)
    }

    pub fn subscribe(&self) -> watch::Receiver<PageSnapshot> {
        self.snapshots.subscribe()
    }

    /// Applies a view event. Never waits on the network.
    pub fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::FieldChanged { field, value } => self.form.set_value(field, value),
            ViewEvent::FieldTouched { field } => self.form.touch(field),
            ViewEvent::SubmitClicked => self.submit(),
        }
        self.publish();
    }

    pub(crate) fn apply(&mut self, completion: Completion) {
        debug_assert!(self.in_flight > 0, "completion applied with nothing in flight");
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Submitted { request, result } => {
                match &result {
                    Ok(()) => info!(request = request.0, "contact submission accepted"),
                    Err(err) => warn!(request = request.0, error = %err, "contact submission failed"),
                }
                self.form.finish_submit(result);
            }
            Completion::Loaded { request, result } => {
                match &result {
                    Ok(posts) => info!(request = request.0, count = posts.len(), "posts loaded"),
                    Err(err) => warn!(request = request.0, error = %err, "posts load failed"),
                }
                self.posts.finish_load(result);
            }
        }
        self.publish();
    }

    /// Waits for the next completion, or `None` when nothing is in flight.
    pub(crate) async fn next_completion(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        self.completion_rx.recv().await
    }

    /// Applies completions until every issued request has resolved.
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    /// Drives the page from `events` until the sender side closes, then
    /// settles outstanding requests and returns the final snapshot.
    pub async fn run(mut self, mut events: mpsc::Receiver<ViewEvent>) -> PageSnapshot {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => self.apply(completion),
            }
        }
        self.settle().await;
        self.snapshot()
    }

    fn submit(&mut self) {
        let Some(submission) = self.form.begin_submit() else {
            debug!("submit blocked by invalid fields");
            return;
        };

        let request = self.issue();
        let transport = Arc::clone(&self.transport);
        let completion_tx = self.completion_tx.clone();
        debug!(request = request.0, "issuing create-request");
        spawn_request(completion_tx, async move {
            let result = transport.create_post(&submission).await;
            Completion::Submitted { request, result }
        });
    }

    fn load(&mut self) {
        let query = self.posts.begin_load();

        let request = self.issue();
        let transport = Arc::clone(&self.transport);
        let completion_tx = self.completion_tx.clone();
        debug!(request = request.0, limit = query.limit, "issuing read-request");
        spawn_request(completion_tx, async move {
            let result = transport.list_posts(&query).await;
            Completion::Loaded { request, result }
        });
        self.publish();
    }

    fn issue(&mut self) -> RequestId {
        self.next_request += 1;
        self.in_flight += 1;
        RequestId(self.next_request)
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

fn spawn_request<F>(completion_tx: mpsc::UnboundedSender<Completion>, work: F) -> JoinHandle<()>
where
    F: Future<Output = Completion> + Send + 'static,
{
    tokio::spawn(async move {
        let completion = work.await;
        // The page may be gone by now.
        if completion_tx.send(completion).is_err() {
            debug!("page dropped before request completed");
        }
    })
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
