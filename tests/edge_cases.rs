use geo::{Point, coord};
use gridpost::{
    AddressCodec, BoundaryPolygon, GeoIndex, GridCodec, GridConfig, GridReference,
    GridpostError, InMemorySource, Resolver, geometry::ring_contains,
};

fn rect_ring(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<geo::Coord<f64>> {
    vec![
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: min_y },
        coord! { x: max_x, y: max_y },
        coord! { x: min_x, y: max_y },
    ]
}

/// Test 1: structural validation of boundary input.
#[test]
fn malformed_boundary_input_is_a_data_error() {
    // Empty collection.
    assert!(matches!(
        GeoIndex::build(Vec::new()),
        Err(GridpostError::InvalidBoundaryData(_))
    ));

    // Two-point ring.
    let short = BoundaryPolygon::new(
        "GA",
        "Accra Metropolitan",
        "G",
        "Greater Accra",
        vec![vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]],
    );
    assert!(matches!(short, Err(GridpostError::InvalidBoundaryData(_))));

    // A literally closed triangle still has only 2 distinct positions.
    let degenerate = BoundaryPolygon::new(
        "GA",
        "Accra Metropolitan",
        "G",
        "Greater Accra",
        vec![vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 0.0 },
        ]],
    );
    assert!(matches!(
        degenerate,
        Err(GridpostError::InvalidBoundaryData(_))
    ));

    // Non-finite coordinate.
    let mut ring = rect_ring(0.0, 0.0, 1.0, 1.0);
    ring[1].y = f64::INFINITY;
    let non_finite =
        BoundaryPolygon::new("GA", "Accra Metropolitan", "G", "Greater Accra", vec![ring]);
    assert!(matches!(
        non_finite,
        Err(GridpostError::InvalidBoundaryData(_))
    ));
}

/// Test 2: the documented upper-edge clamp, and only it.
#[test]
fn upper_edge_clamps_but_out_of_bounds_never_does() {
    let codec = GridCodec::ghana();

    assert_eq!(codec.encode(11.5, 1.5).expect("edge is in bounds").to_string(), "99999999");
    assert_eq!(codec.encode(4.5, -3.5).expect("origin is in bounds").to_string(), "00000000");

    // A hair past the edge must error, not clamp.
    assert!(matches!(
        codec.encode(11.5 + 1e-9, 1.5),
        Err(GridpostError::OutOfBounds { .. })
    ));
    assert!(matches!(
        codec.encode(11.5, 1.5 + 1e-9),
        Err(GridpostError::OutOfBounds { .. })
    ));
}

/// Test 3: boundary points behave deterministically across repeated calls.
#[test]
fn boundary_containment_is_deterministic() {
    let ring = rect_ring(0.0, 0.0, 1.0, 1.0);
    let probes = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.5, 1.0),
        Point::new(1.0, 0.5),
    ];

    for probe in probes {
        let first = ring_contains(probe, &ring);
        for _ in 0..100 {
            assert_eq!(ring_contains(probe, &ring), first);
        }
    }
}

/// Test 4: grid references stay fixed-width across the whole rectangle.
#[test]
fn grid_reference_width_is_invariant() {
    let codec = GridCodec::ghana();

    let mut lat = 4.5;
    while lat <= 11.5 {
        let mut lon = -3.5;
        while lon <= 1.5 {
            let text = codec.encode(lat, lon).expect("in bounds").to_string();
            assert_eq!(text.len(), 8, "({lat}, {lon}) produced '{text}'");
            lon += 0.83;
        }
        lat += 1.17;
    }
}

/// Test 5: non-canonical grid widths flow through compose and parse.
#[test]
fn wide_grid_addresses_round_trip() {
    let config = GridConfig::default().with_cells_per_axis(100_000);
    let codec = GridCodec::new(config).expect("valid config");
    assert_eq!(codec.width(), 5);

    let reference = codec.encode(5.705, -0.20525).expect("in bounds");
    assert_eq!(reference.to_string().len(), 10);

    let addresses = AddressCodec::with_axis_width(codec.width()).expect("valid width");
    let composed = addresses
        .compose("GA", &reference, None)
        .expect("compose");
    let parsed = addresses.parse(&composed).expect("own output");
    assert_eq!(parsed.grid_ref, reference);
}

/// Test 6: an address is never half-parsed.
#[test]
fn parse_failures_carry_the_input_and_yield_nothing() {
    let codec = AddressCodec::new();
    for garbage in [
        "GA-1721-",
        "-1721-6589",
        "GA--6589",
        "GA 1721 6589",
        "GA-1721-6589-004!",
        "\u{2013}GA17216589",
    ] {
        match codec.parse(garbage) {
            Err(GridpostError::InvalidFormat { address, .. }) => assert_eq!(address, garbage),
            other => panic!("expected InvalidFormat for '{garbage}', got {other:?}"),
        }
    }
}

/// Test 7: a resolver over a tiny grid still honors every invariant.
#[test]
fn resolver_over_a_custom_grid() {
    let boundary = BoundaryPolygon::new(
        "GA",
        "Accra Metropolitan",
        "G",
        "Greater Accra",
        vec![rect_ring(-0.21, 5.70, -0.20, 5.71)],
    )
    .expect("valid");

    let config = GridConfig::default().with_cells_per_axis(100);
    let resolver =
        Resolver::with_config(InMemorySource::new(vec![boundary]), config).expect("valid config");

    let resolved = resolver
        .resolve(5.705, -0.205)
        .expect("must not fail")
        .expect("inside the fixture");
    // 100 cells render at width 2: code plus 2+2 digits.
    assert_eq!(resolved.address.len(), "GA-17-65".len());

    let located = resolver.locate(&resolved.address).expect("own output");
    let (cell_lat, cell_lon) = resolver.grid().cell_size();
    assert!(5.705 - located.coordinates.latitude <= cell_lat + 1e-9);
    assert!(-0.205 - located.coordinates.longitude <= cell_lon + 1e-9);
}

/// Test 8: decode range checks catch stale references after a
/// configuration change.
#[test]
fn decode_rejects_references_from_a_bigger_grid() {
    let small = GridCodec::new(GridConfig::default().with_cells_per_axis(2000))
        .expect("valid config");
    assert_eq!(small.width(), 4);

    let stale = GridReference::new(3500, 100, 4).expect("valid shape");
    assert!(matches!(
        small.decode(&stale),
        Err(GridpostError::InvalidInput(_))
    ));
}

/// Test 9: self-intersecting and duplicated geometry never panics, even
/// through the full index path.
#[test]
fn degenerate_geometry_survives_the_index_path() {
    let bowtie = BoundaryPolygon::new(
        "GA",
        "Accra Metropolitan",
        "G",
        "Greater Accra",
        vec![vec![
            coord! { x: -0.21, y: 5.70 },
            coord! { x: -0.20, y: 5.71 },
            coord! { x: -0.20, y: 5.70 },
            coord! { x: -0.21, y: 5.71 },
        ]],
    )
    .expect("structurally valid");

    let duplicated = BoundaryPolygon::new(
        "GT",
        "Tema Metropolitan",
        "G",
        "Greater Accra",
        vec![vec![
            coord! { x: 0.00, y: 5.60 },
            coord! { x: 0.00, y: 5.60 },
            coord! { x: 0.05, y: 5.60 },
            coord! { x: 0.05, y: 5.72 },
            coord! { x: 0.00, y: 5.72 },
        ]],
    )
    .expect("structurally valid");

    let index = GeoIndex::build(vec![bowtie, duplicated]).expect("build");
    // Results are implementation-defined for the bowtie, but stable.
    let first = index
        .find_containing_district(Point::new(-0.205, 5.705))
        .map(|b| b.district_code.clone());
    for _ in 0..10 {
        let again = index
            .find_containing_district(Point::new(-0.205, 5.705))
            .map(|b| b.district_code.clone());
        assert_eq!(again, first);
    }
    assert!(
        index
            .find_containing_district(Point::new(0.02, 5.66))
            .is_some()
    );
}
