//! Query entry point.
//!
//! [`Analyzer`] owns the workspace, the search configuration and the original-location
//! resolver, and turns each query into a scope, a visitor and a [`SearchEngine`] run.

use std::sync::Arc;

use crate::{
    analysis::{
        cancel::CancellationToken,
        config::SearchConfig,
        fieldaccess::{FieldAccess, FieldAccessVisitor},
        implementedby::ImplementedByVisitor,
        locator::{OriginalLocation, StateMachineLocator},
        scope::ScopeResolver,
        search::{QueryKind, SearchEngine, SearchResults, TypeVisitor, VisitorChain},
        symbol::Symbol,
        usedby::UsedByVisitor,
        visited::VisitedSet,
    },
    metadata::{
        method::MethodRc,
        typesystem::{FieldRc, PropertyRc},
        workspace::{ModuleRc, Workspace},
    },
    Result,
};

/// Entry point for cross-reference queries over a [`Workspace`].
///
/// Every query resolves its module scope, builds a fresh visitor with its own deduplication
/// state, and returns a lazy [`SearchResults`] sequence. Queries share nothing but the
/// read-only workspace, so any number of them may run at the same time.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use dotscope_xref::prelude::*;
///
/// let analyzer = Analyzer::new(Arc::new(workspace));
/// let area = analyzer.workspace().find_method("Shapes", "Shapes.IShape", "Area")?;
/// for location in analyzer.implemented_by(&area, &CancellationToken::new())? {
///     println!("{}", location?);
/// }
/// ```
pub struct Analyzer {
    workspace: Arc<Workspace>,
    config: SearchConfig,
    locator: Arc<dyn OriginalLocation>,
}

impl Analyzer {
    /// Creates an analyzer with the default configuration
    #[must_use]
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self::with_config(workspace, SearchConfig::default())
    }

    /// Creates an analyzer with an explicit configuration
    #[must_use]
    pub fn with_config(workspace: Arc<Workspace>, config: SearchConfig) -> Self {
        Self {
            workspace,
            config,
            locator: Arc::new(StateMachineLocator),
        }
    }

    /// Replaces the resolver used to map generated methods to their original location
    #[must_use]
    pub fn with_locator(mut self, locator: Arc<dyn OriginalLocation>) -> Self {
        self.locator = locator;
        self
    }

    /// The analyzed workspace
    #[must_use]
    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolves the modules a query for `symbol` would scan.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type of the symbol is not loaded.
    pub fn resolve_scope(&self, symbol: &Symbol, include_all_modules: bool) -> Result<Vec<ModuleRc>> {
        ScopeResolver::new(&self.workspace, &self.config).resolve_scope(symbol, include_all_modules)
    }

    /// Finds the methods whose bodies call `method`.
    ///
    /// With `is_setter_query`, `method` must be a property setter, and attribute applications
    /// assigning that property through a named argument are reported as well.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidQuery`] if `is_setter_query` is set and `method` is not
    /// the setter of any property, and [`crate::Error::ThreadPool`] if a configured worker pool
    /// cannot be created.
    pub fn used_by(
        &self,
        method: &MethodRc,
        is_setter_query: bool,
        token: &CancellationToken,
    ) -> Result<SearchResults> {
        let visitor = UsedByVisitor::new(
            self.workspace.clone(),
            method.clone(),
            is_setter_query,
            self.locator.clone(),
            Arc::new(VisitedSet::new()),
            self.config.max_inheritance_depth,
        )?;
        let kind = if is_setter_query {
            QueryKind::SetterUsedBy
        } else {
            QueryKind::UsedBy
        };

        self.run(kind, &Symbol::Method(method.clone()), Arc::new(visitor), token)
    }

    /// Finds the concrete methods implementing the interface method `method`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidQuery`] before any module is scanned if `method` is not
    /// a virtual or abstract interface method.
    pub fn implemented_by(&self, method: &MethodRc, token: &CancellationToken) -> Result<SearchResults> {
        let visitor = ImplementedByVisitor::new(
            self.workspace.clone(),
            method.clone(),
            self.config.max_inheritance_depth,
        )?;

        self.run(
            QueryKind::ImplementedBy,
            &Symbol::Method(method.clone()),
            Arc::new(visitor),
            token,
        )
    }

    /// Finds the methods accessing `field` in the requested way.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type of the field is not loaded.
    pub fn field_access(
        &self,
        field: &FieldRc,
        access: FieldAccess,
        token: &CancellationToken,
    ) -> Result<SearchResults> {
        let visitor = FieldAccessVisitor::new(
            self.workspace.clone(),
            field.clone(),
            access,
            self.locator.clone(),
            self.config.max_inheritance_depth,
        )?;

        self.run(
            QueryKind::FieldAccess,
            &Symbol::Field(field.clone()),
            Arc::new(visitor),
            token,
        )
    }

    /// Finds the usages of a property through either accessor.
    ///
    /// Both accessors share one deduplication set, so a method calling the getter and the
    /// setter is reported once. If the property has a setter, attribute applications
    /// assigning it are included.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if an accessor's declaring type is not loaded.
    pub fn property_usages(&self, property: &PropertyRc, token: &CancellationToken) -> Result<SearchResults> {
        let visited = Arc::new(VisitedSet::new());
        let mut visitors: Vec<Arc<dyn TypeVisitor>> = Vec::new();

        if let Some(getter) = &property.getter {
            visitors.push(Arc::new(UsedByVisitor::new(
                self.workspace.clone(),
                getter.clone(),
                false,
                self.locator.clone(),
                visited.clone(),
                self.config.max_inheritance_depth,
            )?));
        }
        if let Some(setter) = &property.setter {
            visitors.push(Arc::new(UsedByVisitor::new(
                self.workspace.clone(),
                setter.clone(),
                true,
                self.locator.clone(),
                visited.clone(),
                self.config.max_inheritance_depth,
            )?));
        }

        self.run(
            QueryKind::PropertyUsedBy,
            &Symbol::Property(property.clone()),
            Arc::new(VisitorChain::new(visitors)),
            token,
        )
    }

    /// Finds the usages of any symbol: call sites for methods, accessor usages for
    /// properties, and reads and writes for fields.
    ///
    /// # Errors
    /// See [`Analyzer::used_by`], [`Analyzer::property_usages`] and [`Analyzer::field_access`].
    pub fn find_usages(&self, symbol: &Symbol, token: &CancellationToken) -> Result<SearchResults> {
        match symbol {
            Symbol::Method(method) => self.used_by(method, false, token),
            Symbol::Property(property) => self.property_usages(property, token),
            Symbol::Field(field) => self.field_access(field, FieldAccess::Any, token),
        }
    }

    fn run(
        &self,
        kind: QueryKind,
        symbol: &Symbol,
        visitor: Arc<dyn TypeVisitor>,
        token: &CancellationToken,
    ) -> Result<SearchResults> {
        let scope = ScopeResolver::new(&self.workspace, &self.config).scope_for(symbol)?;
        log::debug!(
            "{} for {}: scanning {} of {} modules ({})",
            kind,
            symbol,
            scope.len(),
            self.workspace.modules().len(),
            if self.config.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        SearchEngine::new(self.config.clone()).search(kind, scope, visitor, token)
    }
}
