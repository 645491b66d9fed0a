use wasm_bundle_loader::{ Bundle, BundleScope, ComponentDirectory };

use crate::ENGINE ;

#[test]
fn finds_top_level_and_nested_resources() {
    let bundle = ComponentDirectory::new( &ENGINE, fixture_path!( "primary" )).unwrap();

    let service = bundle.find_resource( "service.conf" ).expect( "service.conf present" );
    assert_eq!( service.to_file_path().unwrap(), fixture_path!( "primary", "service.conf" ));

    let nested = bundle.find_resource( "/conf/logging.conf" ).expect( "conf/logging.conf present" );
    assert!( nested.path().ends_with( "/primary/conf/logging.conf" ));
}

#[test]
fn directories_and_escapes_are_not_resources() {
    let bundle = ComponentDirectory::new( &ENGINE, fixture_path!( "primary", "conf" )).unwrap();
    assert!( bundle.find_resource( "../service.conf" ).is_none() );
    assert!( bundle.find_resource( "" ).is_none() );

    let root = ComponentDirectory::new( &ENGINE, fixture_path!( "primary" )).unwrap();
    assert!( root.find_resource( "conf" ).is_none() );
}

#[test]
fn scope_lists_every_directory_in_order() {
    let scope = BundleScope::from_directories( &ENGINE, [ fixture_path!( "primary" ), fixture_path!( "secondary" ) ]).unwrap();
    assert_eq!( scope.len(), 2 );
    assert!( !scope.is_empty() );
    let locations = scope.locations().map(| url | url.to_file_path().unwrap() ).collect::<Vec<_>>();
    assert_eq!( locations, vec![ fixture_path!( "primary" ), fixture_path!( "secondary" ) ]);

    let found = scope.find_resources( "service.conf" )
        .map(| url | url.to_file_path().unwrap() )
        .collect::<Vec<_>>();
    assert_eq!( found, vec![ fixture_path!( "primary", "service.conf" ), fixture_path!( "secondary", "service.conf" ) ]);
    assert_eq!( scope.find_resource( "service.conf" ).unwrap().to_file_path().unwrap(), fixture_path!( "primary", "service.conf" ));
}
