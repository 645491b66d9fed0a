use std::path::PathBuf ;
use thiserror::Error ;

use crate::SymbolName ;



/// Errors that can occur while resolving a symbol.
///
/// Only [`NotFound`]( Self::NotFound ) takes part in fallback: every tier of the
/// resolution chain turns exactly that case into a delegation to the next tier.
/// All other variants describe a real defect in a bundle entry and are
/// surfaced immediately, without consulting the host.
#[derive( Error, Debug )]
pub enum LoadError {
	/// The symbol is absent from every scope that was consulted.
	#[error( "Symbol not found: {0}" )] NotFound( SymbolName ),
	/// A bundle location contains the symbol but its file could not be read.
	#[error( "Failed to read {}: {source}", path.display() )]
	Io { path: PathBuf, #[source] source: std::io::Error },
	/// A bundle location contains the symbol but it failed to compile.
	///
	/// The compiler's diagnostic is kept in `error` and rendered into the
	/// message.
	#[error( "Failed to compile {}: {error}", path.display() )]
	Compile { path: PathBuf, error: wasmtime::Error },
	/// A bundle root could not be expressed as a locator.
	#[error( "Invalid bundle location: {}", .0.display() )] InvalidLocation( PathBuf ),
}

impl LoadError {

	/// Whether this is the one error kind tiers recover from by delegating.
	#[inline] pub fn is_not_found( &self ) -> bool { matches!( self, Self::NotFound( _ )) }

}

/// Returned by [`ResourceSequence::next_locator`]( crate::ResourceSequence::next_locator )
/// once every locator has been consumed.
#[derive( Error, Debug, Clone, Copy, PartialEq, Eq )]
#[error( "Resource sequence exhausted" )]
pub struct SequenceExhausted ;
