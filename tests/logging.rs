use lvgl_composer::logging;

#[test]
fn repeated_init_is_harmless() {
    logging::init(true);
    // The second call loses to the already-installed subscriber and must not
    // panic or error out.
    logging::init(false);
    tracing::info!("logging initialised");
}
