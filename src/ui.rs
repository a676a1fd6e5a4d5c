use std::cell::RefCell;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, Window};

use crate::login;
use crate::persistence::BrowserStorage;
use crate::theme::{self, Theme};

const USERNAME_INPUT_ID: &str = "username";
const THEME_SWITCHER_ID: &str = "themeSwitcher";

thread_local! {
    static PAGE: RefCell<Option<ThemePage>> = const { RefCell::new(None) };
}

pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_logging();

    let document = document(&window()?)?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = init_theme_page() {
                log::error!("theme setup failed: {err:?}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        init_theme_page()
    }
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);
}

/// Handler behind the username form's submit button.
pub fn save_username() -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    let input = by_id::<HtmlInputElement>(&document, USERNAME_INPUT_ID)?;

    let mut storage = BrowserStorage::local();
    match login::submit_username(&mut storage, &input.value()) {
        Ok(saved) => {
            log::info!("signed in as {}", saved.user_id);
            window.location().set_href(saved.redirect_to)
        }
        Err(err) => {
            if let login::LoginError::Storage(cause) = &err {
                log::error!("username not saved: {cause}");
            }
            window.alert_with_message(&err.to_string())
        }
    }
}

fn init_theme_page() -> Result<(), JsValue> {
    let page = ThemePage::new()?;
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(page);
    });

    with_page_mut(|page| {
        page.apply()?;
        page.attach_event_listeners()
    })
    .transpose()?
    .ok_or_else(|| JsValue::from_str("Theme page state missing"))
}

fn with_page_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ThemePage) -> R,
{
    PAGE.with(|slot| {
        let mut borrow = slot.borrow_mut();
        let page = borrow.as_mut()?;
        Some(f(page))
    })
}

struct ThemePage {
    body: HtmlElement,
    switcher: Option<HtmlInputElement>,
    storage: BrowserStorage,
    theme: Theme,
    event_handlers: Vec<Closure<dyn FnMut(Event)>>,
}

impl ThemePage {
    fn new() -> Result<Self, JsValue> {
        let document = document(&window()?)?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?;

        let switcher = match document.get_element_by_id(THEME_SWITCHER_ID) {
            Some(element) => Some(element.dyn_into::<HtmlInputElement>().map_err(|_| {
                JsValue::from_str(&format!("Element '{THEME_SWITCHER_ID}' had unexpected type"))
            })?),
            None => {
                log::debug!("no #{THEME_SWITCHER_ID} on this page, theme is fixed");
                None
            }
        };

        let storage = BrowserStorage::local();
        let theme = theme::load_theme(&storage);

        Ok(Self {
            body,
            switcher,
            storage,
            theme,
            event_handlers: Vec::new(),
        })
    }

    fn attach_event_listeners(&mut self) -> Result<(), JsValue> {
        let Some(switcher) = &self.switcher else {
            return Ok(());
        };

        let switch_change = Closure::wrap(Box::new(move |_event: Event| {
            let _ = with_page_mut(|page| {
                if let Err(err) = page.handle_switch_change() {
                    log::error!("theme change failed: {err:?}");
                }
            });
        }) as Box<dyn FnMut(Event)>);
        switcher
            .add_event_listener_with_callback("change", switch_change.as_ref().unchecked_ref())?;
        self.event_handlers.push(switch_change);

        Ok(())
    }

    fn handle_switch_change(&mut self) -> Result<(), JsValue> {
        let checked = self
            .switcher
            .as_ref()
            .map(HtmlInputElement::checked)
            .unwrap_or(false);
        self.theme = theme::switch_theme(&mut self.storage, checked);
        self.apply()
    }

    fn apply(&self) -> Result<(), JsValue> {
        let classes = self.body.class_list();
        classes.remove_1(self.theme.opposite().class_name())?;
        classes.add_1(self.theme.class_name())?;

        if let Some(switcher) = &self.switcher {
            switcher.set_checked(self.theme.is_dark());
        }

        Ok(())
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("Window unavailable"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("Document unavailable"))
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element with id '{id}'")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element '{id}' had unexpected type")))
}
