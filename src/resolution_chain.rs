//! Ordered resolution strategies and the "first success wins" walk over them.
//!
//! Precedence is data rather than control flow: a [`ResolutionChain`] lists the
//! tiers to consult in order, and [`ResolutionChain::first_success`] returns the
//! unit supplied by the earliest tier that has one.

use std::sync::Arc ;

use crate::{ HostResolver, LoadError, SymbolName };



/// Which part of the chain a strategy stands for.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum Tier {
	/// The plugin's own bundle scope.
	Bundle,
	/// The host resolver supplied alongside the bundle scope.
	Host,
	/// The bundle scope together with its host fallback, as a loader sees it.
	Child,
	/// The loader's own upward chain, consulted last.
	Parent,
}

impl std::fmt::Display for Tier {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// One resolution strategy.
pub trait Resolve<U> {

	/// The tier this strategy represents.
	fn tier( &self ) -> Tier ;

	/// Attempts to resolve `name`.
	///
	/// # Errors
	/// `Ok( None )` is a miss and lets the next tier run. `Err` aborts the walk.
	fn try_resolve( &self, name: &SymbolName ) -> Result<Option<Arc<U>>, LoadError> ;

}

/// Adapts a [`HostResolver`] into a strategy.
///
/// Exactly [`LoadError::NotFound`] becomes a miss; any other failure from the
/// host is passed on.
pub struct Delegate<'a, U> {
	tier: Tier,
	resolver: &'a dyn HostResolver<U>,
}

impl<'a, U> Delegate<'a, U> {
	/// Consults `resolver` on behalf of `tier`.
	pub fn new( tier: Tier, resolver: &'a dyn HostResolver<U> ) -> Self { Self { tier, resolver } }
}

impl<U> Resolve<U> for Delegate<'_, U> {
	fn tier( &self ) -> Tier { self.tier }
	fn try_resolve( &self, name: &SymbolName ) -> Result<Option<Arc<U>>, LoadError> {
		recover_not_found( self.resolver.load_symbol( name ))
	}
}

/// Turns a not-found failure into a miss, leaving every other outcome as is.
pub(crate) fn recover_not_found<T>( result: Result<T, LoadError> ) -> Result<Option<T>, LoadError> {
	match result {
		Ok( unit ) => Ok( Some( unit )),
		Err( err ) if err.is_not_found() => Ok( None ),
		Err( err ) => Err( err ),
	}
}

/// An ordered list of strategies.
pub struct ResolutionChain<'a, U> {
	tiers: Vec<&'a dyn Resolve<U>>,
}

impl<'a, U> ResolutionChain<'a, U> {

	/// Creates a chain consulting `tiers` in the given order.
	pub fn new( tiers: impl IntoIterator<Item = &'a dyn Resolve<U>> ) -> Self {
		Self { tiers: tiers.into_iter().collect() }
	}

	/// Resolves `name` through the first tier that has it.
	///
	/// # Errors
	/// The first error a tier reports, or [`LoadError::NotFound`] if every tier
	/// misses.
	pub fn first_success( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> {
		for tier in &self.tiers {
			if let Some( unit ) = tier.try_resolve( name )? {
				tracing::trace!( symbol = %name, tier = %tier.tier(), "resolved" );
				return Ok( unit );
			}
		}
		Err( LoadError::NotFound( name.clone() ))
	}

}
