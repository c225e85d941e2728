//! Request-phase hook pipeline.
//!
//! Write paths run an ordered list of named handlers before anything is
//! persisted. Handlers are sorted by ascending priority; the first handler
//! that returns an error vetoes the pending write and the remaining handlers
//! never run. Handlers receive the transaction connection of the request they
//! intercept, so anything they persist rolls back with the request.

use diesel::sqlite::SqliteConnection;

/// Request phases a write can be intercepted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Create,
    Update,
    Delete,
}

pub type HandlerFunc<C, E> =
    Box<dyn Fn(&mut SqliteConnection, &mut C) -> std::result::Result<(), E> + Send + Sync>;

/// A named hook handler with an explicit priority.
pub struct Handler<C, E> {
    pub id: &'static str,
    pub priority: i32,
    func: HandlerFunc<C, E>,
}

impl<C, E> Handler<C, E> {
    pub fn new<F>(id: &'static str, priority: i32, func: F) -> Self
    where
        F: Fn(&mut SqliteConnection, &mut C) -> std::result::Result<(), E> + Send + Sync + 'static,
    {
        Handler {
            id,
            priority,
            func: Box::new(func),
        }
    }
}

/// An ordered set of handlers for a single (entity, phase) pair.
pub struct Hook<C, E> {
    handlers: Vec<Handler<C, E>>,
}

impl<C, E> Hook<C, E> {
    pub fn new() -> Self {
        Hook {
            handlers: Vec::new(),
        }
    }

    /// Inserts a handler, keeping handlers sorted by priority. Handlers with
    /// equal priority run in bind order.
    pub fn bind(&mut self, handler: Handler<C, E>) {
        let pos = self
            .handlers
            .iter()
            .position(|h| h.priority > handler.priority)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(pos, handler);
    }

    pub fn unbind(&mut self, id: &str) {
        self.handlers.retain(|h| h.id != id);
    }

    /// Runs every handler in priority order; stops at the first error.
    pub fn trigger(
        &self,
        conn: &mut SqliteConnection,
        ctx: &mut C,
    ) -> std::result::Result<(), E> {
        for handler in &self.handlers {
            (handler.func)(conn, ctx)?;
        }
        Ok(())
    }
}

impl<C, E> Default for Hook<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-phase hooks for one entity type.
pub struct RequestHooks<C, E> {
    create: Hook<C, E>,
    update: Hook<C, E>,
    delete: Hook<C, E>,
}

impl<C, E> RequestHooks<C, E> {
    pub fn new() -> Self {
        RequestHooks {
            create: Hook::new(),
            update: Hook::new(),
            delete: Hook::new(),
        }
    }

    pub fn bind(&mut self, phase: RequestPhase, handler: Handler<C, E>) {
        self.on_mut(phase).bind(handler);
    }

    pub fn unbind(&mut self, phase: RequestPhase, id: &str) {
        self.on_mut(phase).unbind(id);
    }

    pub fn trigger(
        &self,
        phase: RequestPhase,
        conn: &mut SqliteConnection,
        ctx: &mut C,
    ) -> std::result::Result<(), E> {
        self.on(phase).trigger(conn, ctx)
    }

    pub fn on(&self, phase: RequestPhase) -> &Hook<C, E> {
        match phase {
            RequestPhase::Create => &self.create,
            RequestPhase::Update => &self.update,
            RequestPhase::Delete => &self.delete,
        }
    }

    fn on_mut(&mut self, phase: RequestPhase) -> &mut Hook<C, E> {
        match phase {
            RequestPhase::Create => &mut self.create,
            RequestPhase::Update => &mut self.update,
            RequestPhase::Delete => &mut self.delete,
        }
    }
}

impl<C, E> Default for RequestHooks<C, E> {
    fn default() -> Self {
        Self::new()
    }
}
