//! The scoped search engine.
//!
//! A search walks every type definition of an ordered module scope and hands each type to a
//! [`TypeVisitor`], after handing it the module itself once. Visitor outputs are merged into one lazily consumed [`SearchResults`]
//! sequence. The engine knows nothing about instructions or matching; that is the visitor's
//! business.
//!
//! # Execution Modes
//!
//! - **Sequential**: types are visited on the consuming thread, one per `next()` call that
//!   runs out of buffered results. Dropping the sequence means no further type is visited.
//! - **Parallel**: a driver thread fans modules and their types out over a rayon pool. Results
//!   flow through a bounded channel, so producers stall when the consumer falls behind.
//!   Dropping the sequence stops the producers before their next type.
//!
//! In both modes the cancellation token is checked before every type and on every `next()`.
//! Once it is cancelled the sequence ends; types already being visited run to completion.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, SyncSender},
        Arc,
    },
};

use rayon::prelude::*;
use strum::{Display, IntoStaticStr};

use crate::{
    analysis::{
        cancel::{Cancellable, CancellationToken},
        config::SearchConfig,
        result::ResultLocation,
    },
    metadata::{typesystem::CilTypeRc, workspace::ModuleRc},
    Error, Result,
};

/// Per-type producer of query results.
///
/// Implementations are shared between worker threads and keep their per-query state
/// (deduplication sets) behind interior mutability.
pub trait TypeVisitor: Send + Sync {
    /// Visits one type definition of `module` and returns every result found in it
    fn visit(&self, module: &ModuleRc, ty: &CilTypeRc) -> Vec<Result<ResultLocation>>;

    /// Visits a module of the scope once, before any of its types, including modules without
    /// type definitions. Returns results owned by the module itself.
    fn visit_module(&self, _module: &ModuleRc) -> Vec<Result<ResultLocation>> {
        Vec::new()
    }
}

/// Runs several visitors over the same types, concatenating their results per type
pub struct VisitorChain {
    visitors: Vec<Arc<dyn TypeVisitor>>,
}

impl VisitorChain {
    /// Creates a chain; visitors run in the given order
    #[must_use]
    pub fn new(visitors: Vec<Arc<dyn TypeVisitor>>) -> Self {
        Self { visitors }
    }
}

impl TypeVisitor for VisitorChain {
    fn visit(&self, module: &ModuleRc, ty: &CilTypeRc) -> Vec<Result<ResultLocation>> {
        self.visitors
            .iter()
            .flat_map(|visitor| visitor.visit(module, ty))
            .collect()
    }

    fn visit_module(&self, module: &ModuleRc) -> Vec<Result<ResultLocation>> {
        self.visitors
            .iter()
            .flat_map(|visitor| visitor.visit_module(module))
            .collect()
    }
}

/// Name of a query, used in log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum QueryKind {
    /// Call sites of a method
    UsedBy,
    /// Call sites of a property setter, including attribute applications
    SetterUsedBy,
    /// Usages of both accessors of a property
    PropertyUsedBy,
    /// Implementations of an interface method
    ImplementedBy,
    /// Reads and writes of a field
    FieldAccess,
}

/// Drives a [`TypeVisitor`] over a module scope
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    /// Creates an engine with the given configuration
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Starts a search over `scope`.
    ///
    /// Nothing is visited before the returned sequence is polled in sequential mode. In
    /// parallel mode the producers start right away but stall once the result buffer is full.
    ///
    /// # Arguments
    /// * `kind` - Query name for log output
    /// * `scope` - Modules to scan, in order
    /// * `visitor` - The per-type producer
    /// * `token` - Cancellation token checked before every type
    ///
    /// # Errors
    /// Returns [`Error::ThreadPool`] if a dedicated worker pool was requested and could not be
    /// created.
    pub fn search(
        &self,
        kind: QueryKind,
        scope: Vec<ModuleRc>,
        visitor: Arc<dyn TypeVisitor>,
        token: &CancellationToken,
    ) -> Result<SearchResults> {
        let source = if self.config.parallel {
            Source::Parallel(ParallelSearch::start(
                scope,
                visitor,
                token.clone(),
                &self.config,
            )?)
        } else {
            Source::Sequential(SequentialSearch {
                scope,
                visitor,
                module_index: 0,
                type_index: 0,
                module_started: false,
                buffer: VecDeque::new(),
            })
        };

        Ok(SearchResults {
            kind,
            source,
            token: token.clone(),
            produced: 0,
            finished: false,
        })
    }
}

struct SequentialSearch {
    scope: Vec<ModuleRc>,
    visitor: Arc<dyn TypeVisitor>,
    module_index: usize,
    type_index: usize,
    module_started: bool,
    buffer: VecDeque<Result<ResultLocation>>,
}

impl SequentialSearch {
    fn next(&mut self, token: &CancellationToken) -> Option<Result<ResultLocation>> {
        loop {
            if token.is_cancelled() {
                return None;
            }
            if let Some(item) = self.buffer.pop_front() {
                return Some(item);
            }

            let module = self.scope.get(self.module_index)?;
            if !self.module_started {
                self.module_started = true;
                log::trace!("visiting module {}", module.name);
                self.buffer.extend(self.visitor.visit_module(module));
                continue;
            }
            match module.types.get(self.type_index) {
                Some(ty) => {
                    self.type_index += 1;
                    log::trace!("visiting {} in {}", ty.type_name(), module.name);
                    self.buffer.extend(self.visitor.visit(module, ty));
                }
                None => {
                    self.module_index += 1;
                    self.type_index = 0;
                    self.module_started = false;
                }
            }
        }
    }
}

struct ParallelSearch {
    receiver: Receiver<Result<ResultLocation>>,
    stop: Arc<AtomicBool>,
}

impl ParallelSearch {
    fn start(
        scope: Vec<ModuleRc>,
        visitor: Arc<dyn TypeVisitor>,
        token: CancellationToken,
        config: &SearchConfig,
    ) -> Result<Self> {
        let pool = match config.worker_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|index| format!("xref-search-{index}"))
                    .build()
                    .map_err(|error| Error::ThreadPool(error.to_string()))?,
            ),
            None => None,
        };

        let (sender, receiver) = mpsc::sync_channel(config.channel_capacity.max(1));
        let stop = Arc::new(AtomicBool::new(false));
        let driver_stop = stop.clone();

        std::thread::Builder::new()
            .name("xref-search-driver".to_string())
            .spawn(move || {
                let run = || Self::produce(&scope, visitor.as_ref(), &token, &driver_stop, sender);
                match pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
            })
            .map_err(|error| Error::ThreadPool(error.to_string()))?;

        Ok(Self { receiver, stop })
    }

    /// Fans the scope out over the current rayon pool. Returns early, without error, once the
    /// consumer is gone or cancellation was requested.
    fn produce(
        scope: &[ModuleRc],
        visitor: &dyn TypeVisitor,
        token: &CancellationToken,
        stop: &AtomicBool,
        sender: SyncSender<Result<ResultLocation>>,
    ) {
        let outcome = scope.par_iter().try_for_each_with(sender, |sender, module| {
            if stop.load(Ordering::Acquire) || token.is_cancelled() {
                return Err(());
            }
            log::trace!("visiting module {}", module.name);
            for item in visitor.visit_module(module) {
                sender.send(item).map_err(|_| ())?;
            }
            module
                .types
                .par_iter()
                .try_for_each_with(sender.clone(), |sender, ty| {
                    if stop.load(Ordering::Acquire) || token.is_cancelled() {
                        return Err(());
                    }
                    log::trace!("visiting {} in {}", ty.type_name(), module.name);
                    for item in visitor.visit(module, ty) {
                        sender.send(item).map_err(|_| ())?;
                    }
                    Ok(())
                })
        });

        if outcome.is_err() {
            log::debug!("parallel search stopped early");
        }
    }
}

impl Drop for ParallelSearch {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

enum Source {
    Sequential(SequentialSearch),
    Parallel(ParallelSearch),
}

/// The lazy, merged result sequence of one query.
///
/// Items are `Ok` locations or `Err` reports for types the visitor could not process (for
/// example an ambiguous implementation); an error item never ends the sequence. The sequence
/// ends when the scope is exhausted or the cancellation token fires.
pub struct SearchResults {
    kind: QueryKind,
    source: Source,
    token: CancellationToken,
    produced: usize,
    finished: bool,
}

impl SearchResults {
    /// Returns the query kind this sequence belongs to
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Collects the remaining locations, returning the first error item instead if any
    ///
    /// # Errors
    /// Returns the first `Err` item of the sequence.
    pub fn locations(self) -> Result<Vec<ResultLocation>> {
        self.collect()
    }

    fn finish(&mut self) -> Option<Result<ResultLocation>> {
        if !self.finished {
            self.finished = true;
            if let Source::Parallel(search) = &self.source {
                search.stop.store(true, Ordering::Release);
            }
            log::debug!(
                "{} finished with {} items{}",
                self.kind,
                self.produced,
                if self.token.is_cancelled() {
                    " (cancelled)"
                } else {
                    ""
                }
            );
        }
        None
    }
}

impl Iterator for SearchResults {
    type Item = Result<ResultLocation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.token.is_cancelled() {
            return self.finish();
        }

        let item = match &mut self.source {
            Source::Sequential(search) => search.next(&self.token),
            Source::Parallel(search) => search.receiver.recv().ok(),
        };

        match item {
            Some(item) => {
                self.produced += 1;
                Some(item)
            }
            None => self.finish(),
        }
    }
}
