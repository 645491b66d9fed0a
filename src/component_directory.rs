//! A bundle location backed by a directory of WebAssembly components.
//!
//! Symbols map to component files by their dotted path: `acme.lint.rules` is
//! looked up as `acme/lint/rules.wasm` (then `acme/lint/rules.wat`) under the
//! directory root. Anything else in the directory is a resource, addressed by
//! its `/`-separated path relative to the root.

use std::io::ErrorKind ;
use std::path::{ Path, PathBuf };
use pipe_trait::Pipe ;
use url::Url ;
use wasmtime::Engine ;
use wasmtime::component::Component ;

use crate::{ Bundle, BundleScope, LoadError, ResourceLocator, SymbolName };
use crate::symbol_name::is_plain_segment ;



/// A directory on disk holding compiled or textual components and resources.
///
/// Components are compiled with the [`Engine`] the directory was created with,
/// so that the units it defines can be instantiated alongside the embedder's
/// other components.
#[derive( Clone )]
pub struct ComponentDirectory {
	engine: Engine,
	root: PathBuf,
	location: Url,
	/// File extensions tried in order when mapping a symbol to a file
	extensions: Vec<String>,
}

impl ComponentDirectory {

	/// Extensions tried when none are configured.
	pub const DEFAULT_EXTENSIONS: [&'static str; 2] = [ "wasm", "wat" ];

	/// Opens `root` as a bundle location.
	///
	/// The directory does not have to exist yet; a missing directory simply
	/// contains nothing.
	///
	/// # Errors
	/// [`LoadError::InvalidLocation`] if `root` cannot be made absolute or
	/// expressed as a `file://` URL.
	pub fn new( engine: &Engine, root: impl AsRef<Path> ) -> Result<Self, LoadError> {
		let root = std::path::absolute( root.as_ref() )
			.map_err(|_| LoadError::InvalidLocation( root.as_ref().to_path_buf() ))?;
		let location = Url::from_directory_path( &root )
			.map_err(|()| LoadError::InvalidLocation( root.clone() ))?;
		Ok( Self {
			engine: engine.clone(),
			root,
			location,
			extensions: Self::DEFAULT_EXTENSIONS.iter().map(| ext | ( *ext ).to_string() ).collect(),
		})
	}

	/// Replaces the file extensions tried, in order, when mapping a symbol to a file.
	///
	/// ```
	/// # use wasm_bundle_loader::{ ComponentDirectory, Engine };
	/// # fn main() -> Result<(), wasm_bundle_loader::LoadError> {
	/// let engine = Engine::default();
	/// // Only accept precompiled binaries from this bundle
	/// let bundle = ComponentDirectory::new( &engine, "plugins/lint" )?
	/// 	.with_extensions([ "wasm" ]);
	/// # let _ = bundle ;
	/// # Ok(())
	/// # }
	/// ```
	pub fn with_extensions( mut self, extensions: impl IntoIterator<Item = impl Into<String>> ) -> Self {
		self.extensions = extensions.into_iter().map( Into::into ).collect();
		self
	}

	/// The absolute directory root.
	#[inline] pub fn root( &self ) -> &Path { &self.root }

	fn component_path( &self, name: &SymbolName ) -> Result<Option<PathBuf>, LoadError> {
		for extension in &self.extensions {
			let Some( relative ) = name.to_relative_path( extension ) else {
				tracing::trace!( symbol = %name, "symbol does not map to a path" );
				return Ok( None );
			};
			let path = self.root.join( relative );
			if is_file( &path ).map_err(| source | LoadError::Io { path: path.clone(), source })? {
				return Ok( Some( path ));
			}
		}
		Ok( None )
	}

	fn resource_path( &self, name: &str ) -> Option<PathBuf> {
		let mut path = self.root.clone();
		for segment in name.trim_start_matches( '/' ).split( '/' ) {
			if !is_plain_segment( segment ) { return None }
			path.push( segment );
		}
		Some( path )
	}

}

/// Whether `path` is a regular file, treating "no such entry" as `false`.
fn is_file( path: &Path ) -> std::io::Result<bool> {
	match std::fs::metadata( path ) {
		Ok( metadata ) => Ok( metadata.is_file() ),
		Err( err ) if matches!( err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory ) => Ok( false ),
		Err( err ) => Err( err ),
	}
}

impl Bundle<Component> for ComponentDirectory {

	fn location( &self ) -> &Url { &self.location }

	fn define( &self, name: &SymbolName ) -> Result<Option<Component>, LoadError> {
		let Some( path ) = self.component_path( name )? else { return Ok( None ) };
		std::fs::read( &path )
			.map_err(| source | LoadError::Io { path: path.clone(), source })?
			.pipe(| bytes | Component::new( &self.engine, bytes ))
			.map_err(| error | LoadError::Compile { path, error })?
			.pipe(| component | Ok( Some( component )))
	}

	fn find_resource( &self, name: &str ) -> Option<ResourceLocator> {
		let path = self.resource_path( name )?;
		match is_file( &path ) {
			Ok( true ) => Url::from_file_path( &path ).ok(),
			Ok( false ) => None,
			Err( err ) => {
				tracing::warn!( resource = name, location = %self.location, error = %err, "resource probe failed, treating as absent" );
				None
			}
		}
	}

}

impl BundleScope<Component> {

	/// A scope over the component directories at `roots`, searched in order.
	///
	/// # Errors
	/// [`LoadError::InvalidLocation`] for the first root that cannot be opened.
	pub fn from_directories<P: AsRef<Path>>(
		engine: &Engine,
		roots: impl IntoIterator<Item = P>,
	) -> Result<Self, LoadError> {
		roots.into_iter()
			.map(| root | ComponentDirectory::new( engine, root ).map(| bundle | Box::new( bundle ) as Box<dyn Bundle<Component>> ))
			.collect::<Result<Vec<_>, _>>()?
			.pipe( BundleScope::new )
			.pipe( Ok )
	}

}

impl std::fmt::Debug for ComponentDirectory {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ComponentDirectory" )
			.field( "root", &self.root )
			.field( "extensions", &self.extensions )
			.finish_non_exhaustive()
	}
}
