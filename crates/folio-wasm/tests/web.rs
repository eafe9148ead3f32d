//! Browser tests; run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use folio_core::form::{STATUS_FIX_ERRORS, STATUS_NOT_CONFIGURED, STATUS_SENT};
use folio_core::nav::{CLOSE_MENU_LABEL, OPEN_MENU_LABEL};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, KeyboardEventInit, PageTransitionEvent,
    PageTransitionEventInit, Window,
};

wasm_bindgen_test_configure!(run_in_browser);

const CONTACT_FORM: &str = r#"
    <form id="contact-form" class="contact-form">
        <input id="name" type="text">
        <span id="name-error" class="error-message"></span>
        <input id="email" type="email">
        <span id="email-error" class="error-message"></span>
        <textarea id="message"></textarea>
        <span id="message-error" class="error-message"></span>
        <button id="submit-btn" type="submit">Send</button>
        <div id="form-status" class="form-status"></div>
    </form>
"#;

const RELAY_CONFIG: &str = r#"
    <script type="application/json" id="folio-config">
        { "relay": { "service_id": "svc", "template_id": "tpl", "public_key": "key" } }
    </script>
"#;

const HERO: &str = r#"
    <div id="hero-card">
        <div class="avatar-container">
            <div class="avatar-rim-light"></div>
            <div class="avatar-glow"></div>
        </div>
    </div>
"#;

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn set_body(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn select(selector: &str) -> Element {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("missing {selector}"))
}

fn text(id: &str) -> String {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

async fn next_tick() {
    sleep(0).await;
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window().request_animation_frame(&resolve).unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

async fn frames(count: usize) {
    for _ in 0..count {
        next_frame().await;
    }
}

async fn scroll_window(y: f64) {
    window().scroll_to_with_x_and_y(0.0, y);
    window()
        .dispatch_event(&Event::new("scroll").unwrap())
        .unwrap();
    frames(2).await;
}

fn page_transition(kind: &str, persisted: bool) {
    let init = PageTransitionEventInit::new();
    init.set_persisted(persisted);
    let event = PageTransitionEvent::new_with_event_init_dict(kind, &init).unwrap();
    window().dispatch_event(&event).unwrap();
}

fn style(element: &Element, property: &str) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value(property)
        .unwrap()
}

fn fill_valid_fields() {
    let name: HtmlInputElement = select("#name").dyn_into().unwrap();
    let email: HtmlInputElement = select("#email").dyn_into().unwrap();
    let message: HtmlTextAreaElement = select("#message").dyn_into().unwrap();
    name.set_value("Ann");
    email.set_value("ann@example.com");
    message.set_value("Hello, I would like to talk.");
}

/// Stand-in for the EmailJS SDK that records the `sendForm` arguments.
fn install_fake_emailjs() {
    let sdk = js_sys::Object::new();
    let init = js_sys::Function::new_with_args("key", "");
    let send_form = js_sys::Function::new_with_args(
        "service, template, form, key",
        "globalThis.__emailjsCall = { service, template, form, key }; \
         return Promise.resolve({ status: 200, text: 'OK' });",
    );
    Reflect::set(&sdk, &"init".into(), &init).unwrap();
    Reflect::set(&sdk, &"sendForm".into(), &send_form).unwrap();
    Reflect::set(&js_sys::global(), &"emailjs".into(), &sdk).unwrap();
}

fn remove_fake_emailjs() {
    Reflect::delete_property(&js_sys::global(), &"emailjs".into()).unwrap();
    Reflect::delete_property(&js_sys::global(), &"__emailjsCall".into()).unwrap();
}

fn submit_form() -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    select("#contact-form").dispatch_event(&event).unwrap();
    event
}

#[wasm_bindgen_test]
fn mount_adds_scroll_to_top_button_and_teardown_removes_it() {
    set_body(r#"<nav class="navbar"></nav><section id="about">About</section>"#);
    folio_wasm::mount().unwrap();
    assert!(folio_wasm::is_mounted());

    assert_eq!(
        document().query_selector_all("button.scroll-to-top").unwrap().length(),
        1
    );
    let button = select("button.scroll-to-top");
    assert_eq!(button.get_attribute("aria-label").as_deref(), Some("Scroll to top"));
    assert!(!button.class_list().contains("visible"));

    folio_wasm::teardown();
    assert!(!folio_wasm::is_mounted());
    assert!(document()
        .query_selector("button.scroll-to-top")
        .unwrap()
        .is_none());
}

#[wasm_bindgen_test]
fn hamburger_toggles_menu_and_escape_closes_it() {
    set_body(
        r##"
        <nav class="navbar">
            <button class="hamburger" aria-expanded="false"></button>
            <ul class="nav-menu"><li><a class="nav-link" href="#about">About</a></li></ul>
        </nav>
        <section id="about">About</section>
    "##,
    );
    folio_wasm::mount().unwrap();

    let hamburger: HtmlElement = select(".hamburger").dyn_into().unwrap();
    let menu = select(".nav-menu");
    let body = document().body().unwrap();

    hamburger.click();
    assert!(menu.class_list().contains("active"));
    assert!(hamburger.class_list().contains("active"));
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert_eq!(hamburger.get_attribute("aria-label").as_deref(), Some(CLOSE_MENU_LABEL));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    init.set_bubbles(true);
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document().dispatch_event(&escape).unwrap();

    assert!(!menu.class_list().contains("active"));
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert_eq!(hamburger.get_attribute("aria-label").as_deref(), Some(OPEN_MENU_LABEL));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

    folio_wasm::teardown();
}

#[wasm_bindgen_test]
async fn empty_submit_shows_inline_errors() {
    set_body(CONTACT_FORM);
    folio_wasm::mount().unwrap();

    let event = submit_form();
    assert!(event.default_prevented());
    next_tick().await;

    assert_eq!(text("name-error"), "Name is required");
    assert_eq!(text("email-error"), "Email is required");
    assert_eq!(text("message-error"), "Message is required");
    assert_eq!(text("form-status"), STATUS_FIX_ERRORS);
    assert_eq!(select("#form-status").class_name(), "form-status error");

    let submit: HtmlButtonElement = select("#submit-btn").dyn_into().unwrap();
    assert!(!submit.disabled());

    folio_wasm::teardown();
}

#[wasm_bindgen_test]
async fn valid_submit_without_credentials_reports_configuration() {
    set_body(CONTACT_FORM);
    folio_wasm::mount().unwrap();

    fill_valid_fields();

    submit_form();
    next_tick().await;

    assert_eq!(text("form-status"), STATUS_NOT_CONFIGURED);
    assert_eq!(text("name-error"), "");
    let name: HtmlInputElement = select("#name").dyn_into().unwrap();
    assert_eq!(name.value(), "Ann");

    let submit: HtmlButtonElement = select("#submit-btn").dyn_into().unwrap();
    assert!(!submit.disabled());
    assert!(!submit.class_list().contains("sending"));

    folio_wasm::teardown();
}

#[wasm_bindgen_test]
fn blur_reports_field_error() {
    set_body(CONTACT_FORM);
    folio_wasm::mount().unwrap();

    let email: HtmlInputElement = select("#email").dyn_into().unwrap();
    email.set_value("not-an-email");
    email
        .dispatch_event(&Event::new("blur").unwrap())
        .unwrap();
    assert_eq!(text("email-error"), "Please enter a valid email address");

    email.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(text("email-error"), "");

    folio_wasm::teardown();
}

#[wasm_bindgen_test]
async fn relay_receives_the_form_element() {
    install_fake_emailjs();
    set_body(&format!("{RELAY_CONFIG}{CONTACT_FORM}"));
    folio_wasm::mount().unwrap();

    fill_valid_fields();
    let subject = document().create_element("input").unwrap();
    subject.set_attribute("name", "subject").unwrap();
    select("#contact-form").append_child(&subject).unwrap();

    submit_form();
    sleep(20).await;

    let call = Reflect::get(&js_sys::global(), &"__emailjsCall".into()).unwrap();
    let arg = |name: &str| Reflect::get(&call, &name.into()).unwrap();
    assert_eq!(arg("service").as_string().as_deref(), Some("svc"));
    assert_eq!(arg("template").as_string().as_deref(), Some("tpl"));
    assert_eq!(arg("key").as_string().as_deref(), Some("key"));
    assert_eq!(arg("form"), JsValue::from(select("#contact-form")));
    assert_eq!(text("form-status"), STATUS_SENT);

    folio_wasm::teardown();
    remove_fake_emailjs();
}

#[wasm_bindgen_test]
async fn page_restored_from_cache_is_mounted_again() {
    set_body(CONTACT_FORM);
    folio_wasm::mount().unwrap();

    page_transition("pagehide", true);
    assert!(!folio_wasm::is_mounted());
    page_transition("pageshow", true);
    assert!(folio_wasm::is_mounted());

    let event = submit_form();
    assert!(event.default_prevented());
    next_tick().await;
    assert_eq!(text("form-status"), STATUS_FIX_ERRORS);

    folio_wasm::teardown();
}

#[wasm_bindgen_test]
fn ordinary_pageshow_leaves_a_torn_down_page_alone() {
    set_body(CONTACT_FORM);
    folio_wasm::mount().unwrap();
    page_transition("pagehide", false);
    assert!(!folio_wasm::is_mounted());

    page_transition("pageshow", false);
    assert!(!folio_wasm::is_mounted());
}

#[wasm_bindgen_test]
async fn teardown_stops_the_parallax_loop() {
    set_body(HERO);
    folio_wasm::mount().unwrap();
    let card = select("#hero-card");
    frames(2).await;
    if style(&card, "animation").is_empty() {
        // Pointer or touch mode: the loop is easing the card every frame.
        let before = style(&card, "transform");
        frames(2).await;
        assert_ne!(style(&card, "transform"), before);
    }

    folio_wasm::teardown();
    let card_transform = style(&card, "transform");
    let glow_transform = style(&select(".avatar-glow"), "transform");
    frames(2).await;
    sleep(120).await;
    frames(2).await;

    assert_eq!(style(&card, "transform"), card_transform);
    assert_eq!(style(&select(".avatar-glow"), "transform"), glow_transform);
}

#[wasm_bindgen_test]
async fn teardown_stops_scroll_reactors() {
    set_body(
        r#"<nav class="navbar"></nav><section id="about" style="height: 5000px">About</section>"#,
    );
    folio_wasm::mount().unwrap();
    let navbar = select(".navbar");

    scroll_window(1000.0).await;
    assert!(navbar.class_list().contains("scrolled"));

    folio_wasm::teardown();
    scroll_window(0.0).await;
    assert!(navbar.class_list().contains("scrolled"));
}

#[wasm_bindgen_test]
async fn teardown_disconnects_reveal_observer() {
    set_body(r#"<section id="about"><h2 class="section-title">About</h2></section>"#);
    folio_wasm::mount().unwrap();
    folio_wasm::teardown();
    frames(3).await;
    sleep(50).await;

    assert!(!select("#about").class_list().contains("visible"));
    assert!(!select(".section-title").class_list().contains("visible"));

    folio_wasm::mount().unwrap();
    frames(3).await;
    sleep(50).await;
    assert!(select(".section-title").class_list().contains("visible"));

    folio_wasm::teardown();
}
