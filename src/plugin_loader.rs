//! The externally visible loader of a plugin.
//!
//! A [`PluginLoader`] wraps a [`SelfThenHostResolver`] with two extra pieces:
//! a per-instance lock that serializes symbol resolution, and one further
//! delegation to the loader's own upward chain (its **parent**) when neither
//! the bundle scope nor the host have a symbol.
//!
//! # Symbols and resources fall back differently
//!
//! Symbol resolution walks `[Child, Parent]`, where the child tier is itself
//! `[Bundle, Host]`. Resource lookups only
//! walk `[Bundle, Host]`; the parent is never asked for resources and resource
//! lookups never take the lock.

use std::sync::{ Arc, Mutex, PoisonError };

use crate::{ BundleScope, HostResolver, Isolated, LoadError, ResourceLocator, ResourceSequence, SymbolName };
use crate::resolution_chain::{ Delegate, Resolve, ResolutionChain, Tier, recover_not_found };
use crate::self_then_host::SelfThenHostResolver ;



/// Loads a plugin's symbols from its bundle scope first, then from the host,
/// then from its parent chain.
///
/// # Example
///
/// ```
/// use std::sync::Arc ;
/// use wasm_bundle_loader::{ BundleScope, HostRegistry, PluginLoader, SymbolName };
///
/// let host = HostRegistry::<&str>::new().with_unit( "acme.Shared", "host shared" );
/// let parent = HostRegistry::<&str>::new().with_unit( "std.Runtime", "parent runtime" );
///
/// let loader = PluginLoader::<&str>::new( BundleScope::empty(), Arc::new( host ))
/// 	.with_parent( Arc::new( parent ));
///
/// assert_eq!( *loader.load_symbol( &SymbolName::from( "acme.Shared" ))?, "host shared" );
/// assert_eq!( *loader.load_symbol( &SymbolName::from( "std.Runtime" ))?, "parent runtime" );
/// assert!( loader.load_symbol( &SymbolName::from( "acme.Missing" )).unwrap_err().is_not_found() );
/// # Ok::<(), wasm_bundle_loader::LoadError>(())
/// ```
pub struct PluginLoader<U> {
	inner: SelfThenHostResolver<U>,
	parent: Arc<dyn HostResolver<U>>,
	resolution_lock: Mutex<()>,
}

impl<U: Send + Sync + 'static> PluginLoader<U> {

	/// Creates a loader for `scope` that falls back to `host`.
	///
	/// The parent chain starts out [`Isolated`]; set it with
	/// [`with_parent`]( Self::with_parent ).
	pub fn new( scope: BundleScope<U>, host: Arc<dyn HostResolver<U>> ) -> Self {
		Self {
			inner: SelfThenHostResolver::new( scope, host ),
			parent: Arc::new( Isolated ),
			resolution_lock: Mutex::new(()),
		}
	}

	/// Sets the chain consulted after both the bundle scope and the host missed.
	///
	/// This is the chain the loader would have used had it simply deferred to its
	/// structural parent from the start. It often overlaps with the host.
	pub fn with_parent( mut self, parent: Arc<dyn HostResolver<U>> ) -> Self {
		self.parent = parent ;
		self
	}

	/// The bundle scope searched first.
	#[inline] pub fn scope( &self ) -> &BundleScope<U> { self.inner.scope() }

	/// Resolves `name` from the bundle scope, the host or the parent chain, in
	/// that order.
	///
	/// The whole walk runs under this loader's lock, so concurrent requests for a
	/// name that is not yet defined result in a single definition. Calls on other
	/// loaders never contend with this one. A panic in an earlier call does not
	/// lock later callers out.
	///
	/// # Errors
	/// - [`LoadError::NotFound`] if no tier has the symbol.
	/// - Any failure while defining from the bundle scope, or reported by the
	///   host or parent other than not-found. These are not retried elsewhere.
	pub fn load_symbol( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> {
		let _guard = self.resolution_lock.lock().unwrap_or_else( PoisonError::into_inner );
		let child = ChildTier( &self.inner );
		let parent = Delegate::new( Tier::Parent, &*self.parent );
		ResolutionChain::new([ &child as &dyn Resolve<U>, &parent as &dyn Resolve<U> ])
			.first_success( name )
			.inspect_err(| err | tracing::debug!( symbol = %name, error = %err, "symbol resolution failed" ))
	}

	/// The unit this loader defined from its bundle scope under `name`, if any.
	#[inline] pub fn find_defined( &self, name: &str ) -> Option<Arc<U>> { self.inner.find_defined( name ) }

	/// Number of units this loader defined from its bundle scope.
	#[inline] pub fn defined_count( &self ) -> usize { self.inner.defined_count() }

	/// The first locator of resource `name` in the bundle scope, else the host's.
	///
	/// Absence is not an error. Does not take the resolution lock.
	pub fn find_resource( &self, name: &str ) -> Option<ResourceLocator> { self.inner.find_resource( name ) }

	/// All locators of resource `name`: the bundle scope's, then the host's.
	///
	/// Possibly empty, never fails. Does not take the resolution lock.
	pub fn find_resources( &self, name: &str ) -> ResourceSequence { self.inner.find_resources( name ) }

}

/// The bundle-then-host resolver as a single tier, so that its not-found is a
/// miss for the parent to pick up.
struct ChildTier<'a, U>( &'a SelfThenHostResolver<U> );

impl<U: Send + Sync + 'static> Resolve<U> for ChildTier<'_, U> {
	fn tier( &self ) -> Tier { Tier::Child }
	fn try_resolve( &self, name: &SymbolName ) -> Result<Option<Arc<U>>, LoadError> {
		recover_not_found( self.0.resolve( name ))
	}
}

/// A loader can act as the host of another plugin's loader.
impl<U: Send + Sync + 'static> HostResolver<U> for PluginLoader<U> {
	fn load_symbol( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> { PluginLoader::load_symbol( self, name ) }
	fn find_resource( &self, name: &str ) -> Option<ResourceLocator> { PluginLoader::find_resource( self, name ) }
	fn find_resources( &self, name: &str ) -> ResourceSequence { PluginLoader::find_resources( self, name ) }
}

impl<U> std::fmt::Debug for PluginLoader<U> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "PluginLoader" )
			.field( "inner", &self.inner )
			.field( "parent", &"<HostResolver>" )
			.finish_non_exhaustive()
	}
}
