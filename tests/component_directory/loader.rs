use std::sync::Arc ;
use wasm_bundle_loader::{ BundleScope, Component, HostRegistry, LoadError, PluginLoader, SymbolName };

use crate::ENGINE ;

fn host_with( names: &[&str] ) -> ( HostRegistry<Component>, Vec<Arc<Component>> ) {
    let units = names.iter()
        .map(|_| Arc::new( Component::new( &ENGINE, "(component)" ).unwrap() ))
        .collect::<Vec<_>>();
    let host = names.iter().zip( &units )
        .fold( HostRegistry::<Component>::new(), | host, ( name, unit )| host.with_unit( *name, Arc::clone( unit )));
    ( host, units )
}

#[test]
fn bundle_directories_shadow_host_components() {
    crate::init_tracing();

    let ( host, host_units ) = host_with( &[ "acme.B", "acme.D" ]);
    let scope = BundleScope::from_directories( &ENGINE, [ fixture_path!( "primary" ), fixture_path!( "secondary" ) ]).unwrap();
    let loader = PluginLoader::new( scope, Arc::new( host ));

    let b = loader.load_symbol( &SymbolName::from( "acme.B" )).unwrap();
    assert!( !Arc::ptr_eq( &b, &host_units[0] ));
    assert!( Arc::ptr_eq( &b, &loader.load_symbol( &SymbolName::from( "acme.B" )).unwrap() ));

    loader.load_symbol( &SymbolName::from( "acme.C" )).unwrap();
    assert!( Arc::ptr_eq( &loader.load_symbol( &SymbolName::from( "acme.D" )).unwrap(), &host_units[1] ));
    assert!( loader.load_symbol( &SymbolName::from( "acme.E" )).err().is_some_and(| err | err.is_not_found() ));
    assert_eq!( loader.defined_count(), 2 );
}

#[test]
fn corrupt_bundle_component_does_not_fall_back() {
    let ( host, _ ) = host_with( &[ "acme.Broken" ]);
    let scope = BundleScope::from_directories( &ENGINE, [ fixture_path!( "broken" ) ]).unwrap();
    let loader = PluginLoader::new( scope, Arc::new( host ));

    assert!( matches!( loader.load_symbol( &SymbolName::from( "acme.Broken" )), Err( LoadError::Compile { .. })));
}

#[test]
fn units_written_after_construction_are_found() {
    let dir = tempfile::tempdir().unwrap();
    let scope = BundleScope::from_directories( &ENGINE, [ dir.path() ]).unwrap();
    let loader = PluginLoader::new( scope, Arc::new( HostRegistry::<Component>::new() ));

    assert!( loader.load_symbol( &SymbolName::from( "late.Unit" )).err().is_some_and(| err | err.is_not_found() ));
    assert!( loader.find_resource( "late.conf" ).is_none() );

    std::fs::create_dir( dir.path().join( "late" )).unwrap();
    std::fs::write( dir.path().join( "late" ).join( "Unit.wat" ), "(component)" ).unwrap();
    std::fs::write( dir.path().join( "late.conf" ), "" ).unwrap();

    loader.load_symbol( &SymbolName::from( "late.Unit" )).unwrap();
    assert!( loader.find_resource( "late.conf" ).is_some() );
}
