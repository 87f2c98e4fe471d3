//! # Token de Cancelación
//! src/cancel.rs
//!
//! Cancelación cooperativa: los workers revisan el token al inicio de cada
//! iteración y mientras esperan un job. Una transformación en curso nunca
//! se interrumpe.
//!
//! El token combina un flag atómico (consulta barata) con un canal que se
//! cierra al cancelar, para que un worker bloqueado esperando jobs despierte
//! de inmediato.
//!
//! `child()` crea un token que se cancela junto con su padre pero que puede
//! cancelarse solo, sin afectar al padre.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

struct Inner {
    cancelled: AtomicBool,
    /// Nunca se envía nada; soltar el sender desconecta `signal`
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
                signal: rx,
                children: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Señala la cancelación a todos los clones del token y a sus hijos
    ///
    /// Es idempotente.
    pub fn cancel(&self) {
        self.inner.cancel();
        tracing::debug!("cancel token fired");
    }

    /// Token hijo: se cancela cuando se cancela `self`, pero cancelarlo no
    /// toca a `self`
    pub fn child(&self) -> CancelToken {
        let child = CancelToken::new();

        // El flag se lee con el lock tomado; `cancel` lo escribe antes de
        // tomarlo, así ningún hijo queda sin avisar
        let mut children = self.inner.children.lock();
        if self.is_cancelled() {
            child.inner.cancel();
        } else {
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }

        child
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Receiver que queda desconectado tras `cancel()`, para usar en `select!`
    pub(crate) fn signal(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Inner {
    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.trigger.lock().take();

        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
