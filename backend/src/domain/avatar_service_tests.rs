//! Tests for the avatar generation service.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::*;
use crate::domain::ports::{
    AvatarRenderError, FixtureAvatarRenderer, FixtureIndexSource, InMemoryAvatarStore,
    MockAvatarRenderer, MockAvatarStore,
};
use rstest::{fixture, rstest};

const ROOT: &str = "generated_images";

struct Harness {
    service: AvatarService<FixtureAvatarRenderer, InMemoryAvatarStore>,
    store: Arc<InMemoryAvatarStore>,
    stats: Arc<GenerationStats>,
}

fn harness(script: impl IntoIterator<Item = usize>) -> Harness {
    let store = Arc::new(InMemoryAvatarStore::new());
    let stats = Arc::new(GenerationStats::new());
    let selector = VariantSelector::new(
        Palette::standard(),
        Arc::new(FixtureIndexSource::new(script)),
    );
    let service = AvatarService::new(
        Arc::new(FixtureAvatarRenderer),
        Arc::clone(&store),
        selector,
        StorageNamer::new(ROOT),
        Arc::clone(&stats),
    );
    Harness {
        service,
        store,
        stats,
    }
}

fn service_with<R, S>(renderer: R, store: S) -> AvatarService<R, S> {
    AvatarService::new(
        Arc::new(renderer),
        Arc::new(store),
        VariantSelector::new(Palette::standard(), Arc::new(FixtureIndexSource::new([0]))),
        StorageNamer::new(ROOT),
        Arc::new(GenerationStats::new()),
    )
}

#[fixture]
fn arjun() -> NameInput {
    NameInput::new("Arjun", "Sharma")
}

#[rstest]
fn single_generation_stores_selected_variant(arjun: NameInput) {
    let h = harness([3]);

    let image = h.service.generate_single(&arjun).expect("generation succeeds");

    assert_eq!(image.initials.as_str(), "AS");
    assert_eq!(image.variant_index, 4);
    assert_eq!(image.bg_color, "#1ABC9C");
    assert_eq!(image.filename, "AS_variant4.png");
    assert_eq!(image.filepath, Path::new(ROOT).join("AS").join("AS_variant4.png"));
    assert_eq!(image.url(), "/image/AS/AS_variant4.png");
    assert_eq!(h.store.paths(), vec![image.filepath.clone()]);
    assert_eq!(h.stats.snapshot().total_generated, 1);
}

#[rstest]
fn background_matches_palette_entry_for_selected_index(arjun: NameInput) {
    let palette = Palette::standard();
    for draw in 0..12 {
        let image = harness([draw])
            .service
            .generate_single(&arjun)
            .expect("generation succeeds");
        let expected = palette.color_at(image.variant_index).expect("in range");
        assert_eq!(image.bg_color, expected.hex());
    }
}

#[rstest]
fn single_generation_rejects_blank_names() {
    let h = harness([0]);
    let err = h
        .service
        .generate_single(&NameInput::new("  ", "Sharma"))
        .expect_err("blank first name");
    assert_eq!(
        err,
        GenerationError::validation("first_name", "first_name must not be empty")
    );
    assert!(h.store.paths().is_empty());
    assert_eq!(h.stats.snapshot().total_generated, 0);
}

#[rstest]
fn regenerating_same_variant_replaces_the_file(arjun: NameInput) {
    let h = harness([5]);
    let first = h.service.generate_single(&arjun).expect("first");
    let second = h.service.generate_single(&arjun).expect("second");

    assert_eq!(first.filepath, second.filepath);
    assert_eq!(h.store.paths().len(), 1);
    assert_eq!(h.stats.snapshot().count_for("AS"), 2);
}

#[rstest]
fn five_variants_have_five_distinct_colours() {
    let h = harness([8, 1, 6, 2, 10, 0, 4]);
    let images = h
        .service
        .generate_variants(&NameInput::new("Radha", "Krishna"), 5)
        .expect("variants");

    assert_eq!(images.len(), 5);
    let colours: HashSet<&str> = images.iter().map(|i| i.bg_color.as_str()).collect();
    assert_eq!(colours.len(), 5);
    assert!(images.iter().all(|i| i.initials.as_str() == "RK"));
    assert_eq!(h.store.paths().len(), 5);
    assert_eq!(h.stats.snapshot().total_generated, 5);
}

#[rstest]
fn fifteen_variants_repeat_colours_only_after_all_twelve(arjun: NameInput) {
    let h = harness([4, 11, 7]);
    let images = h.service.generate_variants(&arjun, 15).expect("variants");

    assert_eq!(images.len(), 15);
    let (first_pass, overflow) = images.split_at(12);
    let first: HashSet<&str> = first_pass.iter().map(|i| i.bg_color.as_str()).collect();
    assert_eq!(first.len(), 12);
    for image in overflow {
        assert!(first.contains(image.bg_color.as_str()));
    }
    assert_eq!(h.store.paths().len(), 12);
    assert_eq!(h.stats.snapshot().total_generated, 15);
}

#[rstest]
fn zero_variants_is_a_validation_error(arjun: NameInput) {
    let h = harness([0]);
    let err = h.service.generate_variants(&arjun, 0).expect_err("zero count");
    assert!(err.is_validation());
    assert!(h.store.paths().is_empty());
}

#[rstest]
fn bulk_isolates_failing_entries() {
    let h = harness([0, 1, 2, 3]);
    let inputs = vec![
        NameInput::new("Arjun", "Sharma"),
        NameInput::new("", "Patel"),
        NameInput::new("Vikram", "Singh"),
        NameInput::new("Kavitha", "Nair"),
    ];

    let results = h.service.bulk_generate(&inputs);

    assert_eq!(results.len(), 4);
    let failed: Vec<_> = results.iter().filter(|r| !r.succeeded()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed.first().map(|r| &r.input), inputs.get(1));
    assert_eq!(
        results.iter().map(|r| r.input.clone()).collect::<Vec<_>>(),
        inputs
    );
    assert_eq!(h.stats.snapshot().total_generated, 3);
}

#[rstest]
fn bulk_of_nothing_is_empty() {
    assert!(harness([0]).service.bulk_generate(&[]).is_empty());
}

#[rstest]
fn storage_failures_surface_and_skip_stats(arjun: NameInput) {
    let mut store = MockAvatarStore::new();
    store.expect_write().times(1).returning(|location, _| {
        Err(AvatarStoreError::directory(
            location.directory(),
            "permission denied",
        ))
    });
    let service = service_with(FixtureAvatarRenderer, store);

    let err = service.generate_single(&arjun).expect_err("storage fails");

    assert!(matches!(err, GenerationError::Storage(AvatarStoreError::Directory { .. })));
    assert_eq!(service.stats().total_generated, 0);
}

#[rstest]
fn render_failures_surface_without_writing(arjun: NameInput) {
    let mut renderer = MockAvatarRenderer::new();
    renderer
        .expect_render()
        .times(1)
        .returning(|_, _| Err(AvatarRenderError::encode("encoder exploded")));
    let mut store = MockAvatarStore::new();
    store.expect_write().never();
    let service = service_with(renderer, store);

    let err = service.generate_single(&arjun).expect_err("render fails");
    assert!(matches!(err, GenerationError::Render(_)));
}

#[rstest]
fn load_image_returns_stored_bytes(arjun: NameInput) {
    let h = harness([2]);
    let image = h.service.generate_single(&arjun).expect("generated");

    let bytes = h
        .service
        .load_image("AS", &image.filename)
        .expect("image loads");

    assert_eq!(bytes, b"AS|#A569BD");
}

#[rstest]
#[case("AS", "AS_variant9.png")]
#[case("AS", "notes.txt")]
#[case("AS", "../AS_variant1.png")]
#[case("PP", "AS_variant1.png")]
fn load_image_reports_unknown_files_as_not_found(#[case] initials: &str, #[case] filename: &str) {
    let h = harness([0]);
    h.service
        .generate_single(&NameInput::new("Arjun", "Sharma"))
        .expect("generated");

    let err = h
        .service
        .load_image(initials, filename)
        .expect_err("absent image");
    assert!(matches!(err, GenerationError::NotFound { .. }));
}

#[rstest]
#[case("as")]
#[case("..")]
#[case("ASX")]
fn load_image_rejects_malformed_initials(#[case] initials: &str) {
    let err = harness([0])
        .service
        .load_image(initials, "AS_variant1.png")
        .expect_err("malformed initials");
    assert!(err.is_validation());
}

#[rstest]
fn load_image_propagates_read_failures() {
    let mut store = MockAvatarStore::new();
    store
        .expect_read()
        .returning(|location| Err(AvatarStoreError::read(location.filepath(), "io error")));
    let service = service_with(FixtureAvatarRenderer, store);

    let err = service
        .load_image("AS", "AS_variant1.png")
        .expect_err("read fails");
    assert!(matches!(err, GenerationError::Storage(AvatarStoreError::Read { .. })));
}

#[rstest]
fn inventory_reflects_stored_files() {
    let h = harness([0, 1]);
    h.service
        .generate_variants(&NameInput::new("Priya", "Patel"), 3)
        .expect("variants");
    h.service
        .generate_single(&NameInput::new("Vikram", "Singh"))
        .expect("single");

    let inventory = h.service.inventory().expect("inventory");

    assert_eq!(inventory.total_initials(), 2);
    assert_eq!(inventory.total_variants(), 4);
}

#[rstest]
fn palette_exposes_the_configured_colours() {
    let palette = harness([0]).service.palette();
    assert_eq!(palette, Palette::standard());
}

#[rstest]
fn stored_paths_live_under_the_configured_root(arjun: NameInput) {
    let h = harness([0]);
    h.service.generate_variants(&arjun, 2).expect("variants");
    assert!(
        h.store
            .paths()
            .iter()
            .all(|path: &PathBuf| path.starts_with(Path::new(ROOT).join("AS")))
    );
}
