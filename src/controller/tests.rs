use super::*;
use crate::dom::{Document, DomEvent, El, EventKind, NodeId};
use crate::error::UiError;
use crate::model::{FormData, FormSpec, GroupId, ModalDescriptor, Role, RoleMap, TabId, ToastKind};
use crate::page::matters_page;
use crate::services::{KeyValueStore, MemoryStore};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

fn page() -> UiController {
    let mut controller = UiController::new(matters_page(), MemoryStore::new());
    controller.initialize();
    controller
}

fn q(c: &UiController, selector: &str) -> NodeId {
    let doc = c.document();
    doc.query_selector(doc.root(), selector)
        .unwrap()
        .unwrap_or_else(|| panic!("nothing matches {}", selector))
}

fn qa(c: &UiController, selector: &str) -> Vec<NodeId> {
    let doc = c.document();
    doc.query_selector_all(doc.root(), selector).unwrap()
}

fn toast_count(c: &UiController, text: &str) -> usize {
    c.toasts().filter(|t| t.text == text).count()
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> crate::error::Result<()> {
        Err(UiError::Storage {
            path: PathBuf::from("/read-only/state.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Initialization
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_initialize_twice_attaches_once() {
    let mut c = UiController::new(matters_page(), MemoryStore::new());
    let first = c.initialize();
    assert!(first.is_clean());
    assert!(first.total() > 0);

    let second = c.initialize();
    assert!(second.is_clean());
    assert_eq!(second.total(), 0);
    assert_eq!(c.document().listeners().document_listeners().len(), 3);

    let toggle = q(&c, "aside button");
    assert_eq!(c.document().listeners().count_on(toggle, EventKind::Click), 1);
    assert_eq!(c.dispatch(DomEvent::click(toggle)), 1);
    assert!(c.state().sidebar_collapsed);

    assert_eq!(toast_count(&c, "CounselFlow ready"), 1);
}

#[test]
fn test_sentinel_lists_roles() {
    let c = page();
    let trigger = q(&c, "button.profile-menu");
    assert!(c.is_enhanced(trigger, "dropdown"));
    assert!(!c.is_enhanced(trigger, "icon"));

    let chevron = q(&c, ".lucide-chevron-left");
    assert!(!c.is_enhanced(chevron, "icon"));
}

#[test]
fn test_failing_initializer_does_not_stop_others() {
    let roles = RoleMap::default().with(Role::Tab, &["[role=\"tab\""]);
    let mut c = UiController::new(matters_page(), MemoryStore::new()).with_roles(roles);
    let report = c.initialize();

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0],
        UiError::InitFailed { stage: "tabs", .. }
    ));
    assert!(c.tab_groups().is_empty());

    let toggle = q(&c, "aside button");
    c.dispatch(DomEvent::click(toggle));
    assert!(c.state().sidebar_collapsed);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sidebar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_toggle_twice_restores_state_and_store() {
    let mut c = page();
    let sidebar = q(&c, "aside");
    let main = q(&c, "main");
    let toggle = q(&c, "aside button");

    assert!(c.toggle_sidebar().unwrap());
    assert_eq!(
        c.store().get(SIDEBAR_COLLAPSED_KEY).as_deref(),
        Some("true")
    );
    assert_eq!(c.document().style(sidebar, "width"), Some("64px"));
    assert!(c.document().has_class(main, "md:pl-16"));
    assert!(!c.document().has_class(main, "md:pl-64"));
    assert_eq!(c.document().attribute(toggle, "title"), Some("Expand sidebar"));
    assert_eq!(toast_count(&c, "Sidebar collapsed"), 1);

    assert!(!c.toggle_sidebar().unwrap());
    assert!(!c.state().sidebar_collapsed);
    assert_eq!(
        c.store().get(SIDEBAR_COLLAPSED_KEY).as_deref(),
        Some("false")
    );
    assert_eq!(c.document().style(sidebar, "width"), Some("256px"));
    assert!(c.document().has_class(main, "md:pl-64"));
    assert_eq!(c.document().attribute(toggle, "title"), Some("Collapse sidebar"));
}

#[test]
fn test_persisted_collapse_applied_without_animation() {
    let store = MemoryStore::new().with(SIDEBAR_COLLAPSED_KEY, "true");
    let mut c = UiController::new(matters_page(), store);
    c.initialize();

    assert!(c.state().sidebar_collapsed);
    let sidebar = q(&c, "aside");
    let label = q(&c, "nav span");
    assert_eq!(c.document().style(sidebar, "width"), Some("64px"));
    assert_eq!(c.document().style(sidebar, "transition"), None);
    assert!(c.document().is_hidden(label));
    assert_eq!(toast_count(&c, "Sidebar collapsed"), 0);
}

#[test]
fn test_labels_hide_after_collapse_delay() {
    let mut c = page();
    let sidebar = q(&c, "aside");
    let label = q(&c, "nav span");

    c.toggle_sidebar().unwrap();
    assert_eq!(c.document().style(label, "opacity"), Some("0"));
    assert!(!c.document().is_hidden(label));
    assert!(c.document().style(sidebar, "transition").is_some());

    c.advance(ms(200));
    assert!(c.document().is_hidden(label));
    c.advance(ms(100));
    assert_eq!(c.document().style(sidebar, "transition"), None);
}

#[test]
fn test_label_hide_skipped_when_expanded_again() {
    let mut c = page();
    let label = q(&c, "nav span");

    c.toggle_sidebar().unwrap();
    c.advance(ms(100));
    c.toggle_sidebar().unwrap();
    c.advance(ms(200));

    assert!(!c.state().sidebar_collapsed);
    assert!(!c.document().is_hidden(label));
    assert_eq!(c.document().style(label, "opacity"), Some("1"));
}

#[test]
fn test_failed_persist_leaves_state_unchanged() {
    let mut c = UiController::new(matters_page(), ReadOnlyStore);
    c.initialize();
    let sidebar = q(&c, "aside");

    assert!(matches!(c.toggle_sidebar(), Err(UiError::Storage { .. })));
    assert!(!c.state().sidebar_collapsed);
    assert_eq!(c.document().style(sidebar, "width"), Some("256px"));

    let toggle = q(&c, "aside button");
    c.dispatch(DomEvent::click(toggle));
    assert!(!c.state().sidebar_collapsed);
    assert_eq!(toast_count(&c, "Could not save sidebar state"), 1);
}

#[test]
fn test_mobile_toggle() {
    let mut c = page();
    let button = q(&c, ".mobile-menu-button");
    let sidebar = q(&c, "aside");

    c.dispatch(DomEvent::click(button));
    assert!(c.state().mobile_sidebar_open);
    assert!(c.document().has_class(sidebar, "mobile-open"));

    c.dispatch(DomEvent::click(button));
    assert!(!c.document().has_class(sidebar, "mobile-open"));
    assert_eq!(toast_count(&c, "Mobile sidebar toggled"), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tabs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_exactly_one_active_tab() {
    let mut c = page();
    let group = GroupId::new("matter-tabs");
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("active")));

    c.activate_tab(&group, &TabId::new("pending")).unwrap();
    c.activate_tab(&group, &TabId::new("closed")).unwrap();

    let tablist = q(&c, "#matter-tabs");
    let doc = c.document();
    let selected = doc
        .query_selector_all(tablist, "[aria-selected=\"true\"]")
        .unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(doc.attribute(selected[0], "data-tab"), Some("closed"));
    assert_eq!(doc.attribute(selected[0], "tabindex"), Some("0"));
    assert_eq!(doc.query_selector_all(tablist, ".active").unwrap().len(), 1);
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("closed")));
}

#[test]
fn test_mapped_and_placeholder_panels() {
    let mut c = page();
    let group = GroupId::new("matter-tabs");
    let mapped = q(&c, "#panel-active");
    let tablist = q(&c, "#matter-tabs");

    c.activate_tab(&group, &TabId::new("pending")).unwrap();
    c.activate_tab(&group, &TabId::new("closed")).unwrap();

    let doc = c.document();
    assert_eq!(doc.style(mapped, "display"), Some("none"));
    assert_eq!(doc.attribute(mapped, "aria-hidden"), Some("true"));

    let panels = doc.next_sibling(tablist).unwrap();
    assert!(doc.has_class(panels, "tab-panels"));
    let generated = doc.children(panels);
    assert_eq!(generated.len(), 2);
    assert_eq!(doc.style(generated[0], "display"), Some("none"));
    assert_eq!(doc.style(generated[1], "display"), Some("block"));
    assert!(doc
        .text_content(generated[1])
        .contains("Content for Closed tab."));

    c.activate_tab(&group, &TabId::new("active")).unwrap();
    assert_eq!(c.document().style(mapped, "display"), Some("block"));
    assert_eq!(c.document().children(panels).len(), 2);
}

#[test]
fn test_unknown_tab_is_not_found() {
    let mut c = page();
    assert!(matches!(
        c.activate_tab(&GroupId::new("nope"), &TabId::new("active")),
        Err(UiError::ElementNotFound(_))
    ));
    assert!(matches!(
        c.activate_tab(&GroupId::new("matter-tabs"), &TabId::new("archived")),
        Err(UiError::ElementNotFound(_))
    ));
    assert_eq!(
        c.state().active_tab(&GroupId::new("matter-tabs")),
        Some(&TabId::new("active"))
    );
}

#[test]
fn test_tab_click_and_keyboard() {
    let mut c = page();
    let group = GroupId::new("matter-tabs");
    let pending = q(&c, "[data-tab=\"pending\"]");
    let closed = q(&c, "[data-tab=\"closed\"]");

    c.dispatch(DomEvent::click(pending));
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("pending")));
    assert_eq!(toast_count(&c, "Switched to: Pending"), 1);

    c.dispatch(DomEvent::key_down(closed, "ArrowRight"));
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("active")));

    c.dispatch(DomEvent::key_down(pending, "End"));
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("closed")));

    c.dispatch(DomEvent::key_down(pending, "Tab"));
    assert_eq!(c.state().active_tab(&group), Some(&TabId::new("closed")));
}

// ─────────────────────────────────────────────────────────────────────────────
// Modals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_open_replaces_and_close_detaches() {
    let mut c = page();
    let baseline = c.document().listeners().len();

    c.open_modal(ModalDescriptor::form("Create New Matter", FormSpec::new_matter()))
        .unwrap();
    assert_eq!(qa(&c, "[data-modal-root]").len(), 1);

    c.open_modal(ModalDescriptor::form("Add Entity", FormSpec::new_entity()))
        .unwrap();
    assert_eq!(qa(&c, "[data-modal-root]").len(), 1);
    assert_eq!(c.document().text_content(q(&c, ".modal-title")), "Add Entity");
    assert!(c.state().active_modal.is_some());

    assert!(c.close_modal());
    assert!(qa(&c, "[data-modal-root]").is_empty());
    assert_eq!(c.document().listeners().len(), baseline);
    assert!(c.state().active_modal.is_none());
    assert!(!c.close_modal());
}

#[test]
fn test_invocation_backdrop_and_escape() {
    let mut c = page();
    let new_matter = q(&c, "[data-modal-form=\"new-matter\"]");

    c.dispatch(DomEvent::click(new_matter));
    assert_eq!(
        c.current_modal().map(|m| m.title.as_str()),
        Some("Create New Matter")
    );

    let body = q(&c, ".modal-body");
    c.dispatch(DomEvent::click(body));
    assert!(c.current_modal().is_some());

    let backdrop = q(&c, "[data-modal-root]");
    c.dispatch(DomEvent::click(backdrop));
    assert!(c.current_modal().is_none());

    c.dispatch(DomEvent::click(new_matter));
    let root = c.document().body();
    c.dispatch(DomEvent::key_down(root, "Escape"));
    assert!(c.current_modal().is_none());

    c.dispatch(DomEvent::click(new_matter));
    let cancel = q(&c, "[data-action=\"closeModal\"]");
    c.dispatch(DomEvent::click(cancel));
    assert!(c.current_modal().is_none());
    assert_eq!(c.dispatch(DomEvent::click(cancel)), 0);
}

#[test]
fn test_text_modal_from_attributes() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    c.document_mut().build(
        body,
        El::new("button")
            .attr("data-action", "openModal")
            .attr("data-modal-body", "Matter archived on request.")
            .text("Archive notice"),
    );
    c.initialize();

    let button = q(&c, "button");
    c.dispatch(DomEvent::click(button));
    assert_eq!(
        c.current_modal().map(|m| m.title.as_str()),
        Some("Archive notice")
    );
    assert_eq!(
        c.document().text_content(q(&c, ".modal-body")),
        "Matter archived on request."
    );
}

#[test]
fn test_show_toast_invocation() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    c.document_mut().build(
        body,
        El::new("button")
            .attr("data-action", "showToast")
            .attr("data-toast-message", "Report exported")
            .attr("data-toast-kind", "success")
            .text("Export"),
    );
    c.initialize();

    let export = q(&c, "[data-action=\"showToast\"]");
    assert!(!c.is_enhanced(export, "button"));
    c.dispatch(DomEvent::click(export));

    let toast = c.toasts().find(|t| t.text == "Report exported").unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast_count(&c, "Export started..."), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Toasts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_toast_expires_after_duration() {
    let mut c = UiController::new(matters_page(), MemoryStore::new());
    let id = c.show_toast("Saved successfully!", ToastKind::Success, None);

    let toasts = qa(&c, ".toast");
    assert_eq!(toasts.len(), 1);
    assert!(c.document().has_class(toasts[0], "bg-green-500"));
    assert!(c
        .document()
        .text_content(toasts[0])
        .contains("Saved successfully!"));

    c.advance(ms(2999));
    assert_eq!(qa(&c, ".toast").len(), 1);
    c.advance(ms(1));
    assert!(qa(&c, ".toast").is_empty());
    assert_eq!(c.toasts().count(), 0);
    assert!(!c.remove_toast(id));
}

#[test]
fn test_toast_close_then_expiry_is_noop() {
    let mut c = UiController::new(matters_page(), MemoryStore::new());
    c.show_toast("Matter saved", ToastKind::Info, Some(Duration::from_secs(10)));
    c.show_toast("Contract saved", ToastKind::Info, Some(Duration::from_secs(10)));

    let close = q(&c, ".toast-close");
    c.dispatch(DomEvent::click(close));
    assert_eq!(qa(&c, ".toast").len(), 1);
    assert_eq!(toast_count(&c, "Matter saved"), 0);

    c.advance(Duration::from_secs(10));
    assert!(qa(&c, ".toast").is_empty());
    assert!(c.timers().is_idle());
}

// ─────────────────────────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_validate_email_input() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    let email = c.document_mut().build(
        body,
        El::new("input")
            .attr("type", "email")
            .attr("name", "email")
            .attr("value", "not-an-email"),
    );

    assert!(!c.validate_form_input(email));
    assert!(c.document().has_class(email, "border-red-500"));
    assert_eq!(c.document().attribute(email, "aria-invalid"), Some("true"));

    c.document_mut().set_value(email, "a@b.com");
    assert!(c.validate_form_input(email));
    assert!(c.document().has_class(email, "border-green-500"));
    assert!(!c.document().has_class(email, "border-red-500"));
    assert_eq!(c.document().attribute(email, "aria-invalid"), Some("false"));

    c.document_mut().set_value(email, "");
    assert!(c.validate_form_input(email));
    assert!(!c.document().has_class(email, "border-green-500"));
}

#[test]
fn test_validate_phone_and_required() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    let phone = c.document_mut().build(
        body,
        El::new("input")
            .attr("type", "tel")
            .attr("value", "(555) 123-4567"),
    );
    let title = c
        .document_mut()
        .build(body, El::new("input").attr("required", ""));

    assert!(c.validate_form_input(phone));
    c.document_mut().set_value(phone, "0123");
    assert!(!c.validate_form_input(phone));

    assert!(!c.validate_form_input(title));
    assert!(c.document().has_class(title, "border-red-500"));
}

#[test]
fn test_validate_select_and_textarea_read_their_content() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    let practice = c.document_mut().build(
        body,
        El::new("select")
            .attr("name", "practice")
            .attr("required", "")
            .child(El::new("option").attr("value", "ip").attr("selected", "").text("IP")),
    );
    let notes = c.document_mut().build(
        body,
        El::new("textarea").attr("required", "").text("Prior notes"),
    );
    let empty_notes = c
        .document_mut()
        .build(body, El::new("textarea").attr("required", ""));

    assert!(c.validate_form_input(practice));
    assert!(c.document().has_class(practice, "border-green-500"));
    assert!(c.validate_form_input(notes));
    assert!(!c.validate_form_input(empty_notes));
}

#[test]
fn test_submit_collects_textarea_text() {
    let mut c = page();
    let submitted: Rc<RefCell<Option<FormData>>> = Rc::default();
    let sink = Rc::clone(&submitted);
    c.open_modal(
        ModalDescriptor::form("Create New Matter", FormSpec::new_matter())
            .on_submit(move |data| *sink.borrow_mut() = Some(data.clone())),
    )
    .unwrap();

    let title = q(&c, "#new-matter-title");
    c.document_mut().set_value(title, "Acme Merger");
    let description = q(&c, "#new-matter-description");
    c.document_mut().set_text(description, "Share purchase");
    c.dispatch(DomEvent::click(q(&c, ".modal-form button[type=submit]")));

    let data = submitted.borrow().clone().unwrap();
    assert_eq!(data["description"], "Share purchase");
    assert_eq!(data["client"], "TechCorp Limited");
}

#[test]
fn test_live_validation_on_input() {
    let mut c = page();
    c.open_modal(ModalDescriptor::form("Add Entity", FormSpec::new_entity()))
        .unwrap();
    let email = q(&c, "#new-entity-contact_email");

    c.document_mut().set_value(email, "legal@");
    c.dispatch(DomEvent::input(email));
    assert!(c.document().has_class(email, "border-red-500"));

    c.dispatch(DomEvent::focus(email));
    assert_eq!(c.document().style(email, "border-color"), Some("#3b82f6"));
    c.dispatch(DomEvent::blur(email));
    assert_eq!(c.document().style(email, "border-color"), None);
}

#[test]
fn test_modal_form_submit() {
    let mut c = page();
    let submitted: Rc<RefCell<Option<FormData>>> = Rc::default();
    let sink = Rc::clone(&submitted);
    c.open_modal(
        ModalDescriptor::form("Add Entity", FormSpec::new_entity())
            .on_submit(move |data| {
                *sink.borrow_mut() = Some(data.clone());
            }),
    )
    .unwrap();

    let submit = q(&c, ".modal-form button[type=submit]");
    c.dispatch(DomEvent::click(submit));
    assert!(c.current_modal().is_some());
    assert!(submitted.borrow().is_none());
    assert!(c
        .document()
        .has_class(q(&c, "#new-entity-name"), "border-red-500"));
    assert_eq!(toast_count(&c, "Please correct the highlighted fields"), 1);

    let name = q(&c, "#new-entity-name");
    c.document_mut().set_value(name, "Acme Holdings");
    c.dispatch(DomEvent::click(submit));

    assert!(c.current_modal().is_none());
    let data = submitted.borrow().clone().unwrap();
    assert_eq!(data["name"], "Acme Holdings");
    assert_eq!(data["entity_type"], "Corporation");
    assert_eq!(data["contact_email"], "");
    assert_eq!(toast_count(&c, "Form submitted successfully!"), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Dropdowns
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_profile_dropdown_and_outside_click() {
    let mut c = page();
    let trigger = q(&c, "button.profile-menu");
    assert_eq!(c.document().attribute(trigger, "aria-expanded"), Some("false"));

    c.dispatch(DomEvent::click(trigger));
    assert_eq!(c.document().attribute(trigger, "aria-expanded"), Some("true"));
    assert_eq!(c.state().open_dropdown, Some(trigger));
    let items = qa(&c, ".dropdown-menu [role=menuitem]");
    assert_eq!(items.len(), 5);
    assert_eq!(c.document().text_content(items[0]), "View Profile");

    let heading = q(&c, "main h2");
    c.dispatch(DomEvent::click(heading));
    assert!(qa(&c, ".dropdown-menu").is_empty());
    assert_eq!(c.document().attribute(trigger, "aria-expanded"), Some("false"));
    assert_eq!(c.state().open_dropdown, None);

    c.dispatch(DomEvent::click(trigger));
    c.dispatch(DomEvent::click(trigger));
    assert!(qa(&c, ".dropdown-menu").is_empty());
}

#[test]
fn test_sign_out_navigates_after_delay() {
    let mut c = page();
    let trigger = q(&c, "button.profile-menu");
    c.dispatch(DomEvent::click(trigger));
    let sign_out = *qa(&c, ".dropdown-menu [role=menuitem]").last().unwrap();

    c.dispatch(DomEvent::click(sign_out));
    assert!(qa(&c, ".dropdown-menu").is_empty());
    assert_eq!(toast_count(&c, "Signing out..."), 1);
    assert_eq!(c.take_navigation(), None);

    c.advance(ms(1000));
    assert_eq!(c.take_navigation().as_deref(), Some("../login/"));
}

#[test]
fn test_generic_dropdown_and_escape() {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    c.document_mut().build(
        body,
        El::new("div").child(
            El::new("button")
                .class("dropdown-trigger")
                .text("Bulk actions"),
        ),
    );
    c.initialize();

    let trigger = q(&c, ".dropdown-trigger");
    c.dispatch(DomEvent::click(trigger));
    let items = qa(&c, ".dropdown-menu [role=menuitem]");
    assert_eq!(items.len(), 2);

    c.dispatch(DomEvent::click(items[1]));
    assert_eq!(toast_count(&c, "Selected: Action 2"), 1);

    c.dispatch(DomEvent::click(trigger));
    c.dispatch(DomEvent::key_down(trigger, "Escape"));
    assert!(qa(&c, ".dropdown-menu").is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_row_selection() {
    let mut c = page();
    let table = q(&c, "#matters-table");
    let rows = qa(&c, "tbody tr");

    c.dispatch(DomEvent::click(rows[1]));
    c.dispatch(DomEvent::click(rows[0]));

    assert_eq!(qa(&c, "tr.selected"), vec![rows[0]]);
    assert_eq!(c.state().selected_row(table), Some(rows[0]));
    assert_eq!(toast_count(&c, "Row 1 selected"), 1);
    assert_eq!(toast_count(&c, "Row 2 selected"), 1);
}

#[test]
fn test_header_click_notifies_delegate() {
    let requests: Rc<RefCell<Vec<SortRequest>>> = Rc::default();
    let sink = Rc::clone(&requests);
    let mut c = UiController::new(matters_page(), MemoryStore::new())
        .with_sort_delegate(move |r: &SortRequest| sink.borrow_mut().push(r.clone()));
    c.initialize();

    let client = qa(&c, "th")[1];
    c.dispatch(DomEvent::click(client));
    assert_eq!(c.document().attribute(client, "aria-sort"), Some("ascending"));
    c.dispatch(DomEvent::click(client));
    assert_eq!(c.document().attribute(client, "aria-sort"), Some("descending"));

    let requests = requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].column, 1);
    assert_eq!(requests[0].label, "Client");
    assert_eq!(requests[0].direction, SortDirection::Ascending);
    assert_eq!(requests[1].direction, SortDirection::Descending);
}

#[test]
fn test_enhance_table_picks_up_new_rows() {
    let mut c = page();
    let table = q(&c, "#matters-table");
    let tbody = q(&c, "tbody");
    assert_eq!(c.enhance_table(table).unwrap(), 0);

    let row = c.document_mut().build(
        tbody,
        El::new("tr").child(El::new("td").text("Trademark Renewal")),
    );
    assert_eq!(c.enhance_table(table).unwrap(), 1);
    c.dispatch(DomEvent::click(row));
    assert_eq!(c.state().selected_row(table), Some(row));
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

fn visible_rows(c: &UiController) -> Vec<String> {
    qa(c, "tbody tr")
        .into_iter()
        .filter(|r| c.document().style(*r, "display") != Some("none"))
        .map(|r| c.document().text_content(r))
        .collect()
}

#[test]
fn test_search_is_debounced() {
    let mut c = page();
    let input = q(&c, "input[type=search]");

    c.document_mut().set_value(input, "patent");
    c.dispatch(DomEvent::input(input));
    c.advance(ms(299));
    assert_eq!(visible_rows(&c).len(), MATTERS_ROWS);

    c.advance(ms(1));
    let visible = visible_rows(&c);
    assert_eq!(visible.len(), 1);
    assert!(visible[0].contains("Patent Filing"));
    assert_eq!(toast_count(&c, "Search results for \"patent\""), 1);

    c.document_mut().set_value(input, "acme");
    c.dispatch(DomEvent::input(input));
    c.advance(ms(100));
    c.document_mut().set_value(input, "supply");
    c.dispatch(DomEvent::input(input));
    c.advance(ms(300));

    assert_eq!(toast_count(&c, "Search results for \"acme\""), 0);
    let visible = visible_rows(&c);
    assert_eq!(visible.len(), 1);
    assert!(visible[0].contains("Supply Dispute"));
}

const MATTERS_ROWS: usize = crate::page::MATTERS.len();

#[test]
fn test_search_empty_state_and_clear() {
    let mut c = page();
    let input = q(&c, "input[type=search]");

    c.document_mut().set_value(input, "zzz");
    c.dispatch(DomEvent::key_down(input, "Enter"));
    let empty = q(&c, "tr.empty-state");
    assert!(c
        .document()
        .text_content(empty)
        .contains("No results found for \"zzz\""));

    c.document_mut().set_value(input, "");
    c.dispatch(DomEvent::key_down(input, "Enter"));
    assert!(qa(&c, "tr.empty-state").is_empty());
    assert_eq!(visible_rows(&c).len(), MATTERS_ROWS);
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_icon_press_animation_and_toast() {
    let mut c = page();
    let pencil = q(&c, "tbody svg.lucide-pencil");
    assert!(c.is_enhanced(pencil, "icon"));

    c.dispatch(DomEvent::click(pencil));
    assert_eq!(c.document().style(pencil, "transform"), Some("scale(0.9)"));
    assert_eq!(toast_count(&c, "Edit mode activated"), 1);

    c.advance(ms(100));
    assert_eq!(c.document().style(pencil, "transform"), Some("scale(1)"));
}

#[test]
fn test_icon_click_does_not_reach_row() {
    let mut c = page();
    let pencil = q(&c, "tbody svg.lucide-pencil");
    let row = c.document().closest(pencil, "tr").unwrap().unwrap();
    assert_eq!(c.document().style(pencil, "cursor"), Some("pointer"));

    c.dispatch(DomEvent::click(pencil));
    assert_eq!(toast_count(&c, "Edit mode activated"), 1);
    assert!(c.toasts().all(|t| !t.text.contains("selected")));
    assert!(!c.document().has_class(row, "selected"));
}

#[test]
fn test_icon_inside_button_leaves_click_to_button() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.build(
        body,
        El::new("button")
            .class("icon-only")
            .child(El::new("svg").class("lucide lucide-settings")),
    );
    let mut c = UiController::new(doc, MemoryStore::new());
    c.initialize();
    let icon = q(&c, "svg.lucide-settings");
    assert!(!c.is_enhanced(icon, "icon"));
    assert_eq!(c.document().listeners().count_on(icon, EventKind::Click), 0);
    assert!(c.is_enhanced(q(&c, "button.icon-only"), "button"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Buttons
// ─────────────────────────────────────────────────────────────────────────────

fn find_button(c: &UiController, label: &str) -> NodeId {
    qa(c, "button")
        .into_iter()
        .find(|b| c.document().text_content(*b) == label)
        .unwrap_or_else(|| panic!("no button labelled {}", label))
}

fn controller_with(el: El) -> UiController {
    let mut c = UiController::new(Document::new(), MemoryStore::new());
    let body = c.document().body();
    c.document_mut().build(body, el);
    c.initialize();
    c
}

#[test]
fn test_buttons_owned_elsewhere_are_not_claimed() {
    let c = page();
    let toggle = q(&c, "aside button");
    let new_matter = find_button(&c, "New Matter");
    assert!(!c.is_enhanced(toggle, "button"));
    assert!(!c.is_enhanced(new_matter, "button"));
    assert_eq!(c.document().listeners().count_on(new_matter, EventKind::Click), 1);

    let report = find_button(&c, "Generate Report");
    assert!(c.is_enhanced(report, "button"));
}

#[test]
fn test_generate_report_follow_up_toast() {
    let mut c = page();
    let report = find_button(&c, "Generate Report");
    c.dispatch(DomEvent::click(report));
    assert_eq!(c.document().style(report, "transform"), Some("scale(0.95)"));
    assert_eq!(toast_count(&c, "Generating report..."), 1);

    c.advance(ms(100));
    assert_eq!(c.document().style(report, "transform"), None);

    c.advance(ms(1899));
    assert_eq!(toast_count(&c, "Report generated successfully!"), 0);
    c.advance(ms(1));
    let done = c
        .toasts()
        .find(|t| t.text == "Report generated successfully!")
        .unwrap();
    assert_eq!(done.kind, ToastKind::Success);
}

#[test]
fn test_import_and_export_quick_actions() {
    let mut c = page();
    c.dispatch(DomEvent::click(find_button(&c, "Import")));
    assert_eq!(toast_count(&c, "Import functionality activated"), 1);

    c.dispatch(DomEvent::click(find_button(&c, "Export")));
    assert_eq!(toast_count(&c, "Export started..."), 1);
    c.advance(ms(1500));
    assert_eq!(toast_count(&c, "Export completed!"), 1);
}

#[test]
fn test_quick_action_opens_billing_form() {
    let mut c = controller_with(
        El::new("div")
            .child(El::new("button").text("Change Plan"))
            .child(El::new("button").text("Add New Card")),
    );
    c.dispatch(DomEvent::click(find_button(&c, "Change Plan")));
    assert_eq!(
        c.current_modal().map(|m| m.title.as_str()),
        Some("Change Subscription Plan")
    );
    let plan = q(&c, "[data-modal-root] select[name=plan]");
    assert_eq!(c.document().control_value(plan), "Professional - $299/month");

    c.dispatch(DomEvent::click(find_button(&c, "Add New Card")));
    assert_eq!(c.current_modal().map(|m| m.title.as_str()), Some("Add New Card"));
    assert_eq!(qa(&c, "[data-modal-root] input[required]").len(), 4);
}

#[test]
fn test_save_button_loading_state() {
    let mut c = controller_with(
        El::new("button")
            .child(El::new("svg").class("lucide lucide-save"))
            .child(El::new("span").text("Save draft")),
    );
    let button = q(&c, "button");
    let icon = q(&c, "svg.lucide-save");

    c.dispatch(DomEvent::click(button));
    assert!(c.is_loading(button));
    assert!(c.document().has_attribute(button, "disabled"));
    assert_eq!(c.document().attribute(button, "aria-busy"), Some("true"));
    assert!(c.document().is_hidden(icon));
    let indicator = q(&c, "button .button-loading");
    assert_eq!(c.document().text_content(indicator), "Saving...");
    assert!(c.document().query_selector(indicator, "svg.animate-spin").unwrap().is_some());

    // Disabled while loading: no second press animation or finish timer
    let pending = c.timers().pending();
    c.dispatch(DomEvent::click(button));
    assert_eq!(c.timers().pending(), pending);

    c.advance(ms(1200));
    assert!(!c.is_loading(button));
    assert!(!c.document().has_attribute(button, "disabled"));
    assert!(!c.document().is_hidden(icon));
    assert!(qa(&c, ".button-loading").is_empty());
    assert_eq!(c.document().text_content(button), "Save draft");
    assert_eq!(toast_count(&c, "Saved successfully!"), 1);
}

#[test]
fn test_submit_outside_form_simulates_submission() {
    let mut c = controller_with(El::new("button").text("Send notice"));
    let button = q(&c, "button");
    c.dispatch(DomEvent::click(button));
    assert_eq!(c.document().text_content(button), "Submitting...");

    c.advance(ms(1500));
    assert_eq!(c.document().text_content(button), "Send notice");
    assert_eq!(toast_count(&c, "Submitted successfully!"), 1);
}

#[test]
fn test_label_kinds_toast_immediately() {
    let mut c = controller_with(
        El::new("div")
            .child(El::new("button").text("View details"))
            .child(El::new("button").text("Browse"))
            .child(El::new("button").attr("aria-label", "Archive")),
    );
    for label in ["View details", "Browse"] {
        c.dispatch(DomEvent::click(find_button(&c, label)));
    }
    let archive = q(&c, "button[aria-label=Archive]");
    c.dispatch(DomEvent::click(archive));

    assert_eq!(toast_count(&c, "Opening details..."), 1);
    assert_eq!(toast_count(&c, "Upload dialog opened"), 1);
    assert_eq!(toast_count(&c, "Action: archive"), 1);
}

#[test]
fn test_cancel_button_closes_modal() {
    let mut c = controller_with(El::new("button").text("Dismiss"));
    c.open_modal(ModalDescriptor::text("Notice", "Body")).unwrap();
    c.dispatch(DomEvent::click(find_button(&c, "Dismiss")));
    assert!(c.current_modal().is_none());
    assert_eq!(toast_count(&c, "Action cancelled"), 1);
}

#[test]
fn test_buttons_stage_is_idempotent() {
    let mut c = page();
    let report = find_button(&c, "Generate Report");
    let second = c.initialize();
    assert_eq!(second.enhanced.get("buttons"), Some(&0));
    assert_eq!(c.document().listeners().count_on(report, EventKind::Click), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Toggles, badges, progress and interactive elements
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_toggle_reports_state_on_change() {
    let mut c = page();
    let toggle = q(&c, "input[type=checkbox]");
    assert!(c.is_enhanced(toggle, "toggle"));

    c.document_mut().set_attribute(toggle, "checked", "");
    c.dispatch(DomEvent::change(toggle));
    let on = c.toasts().find(|t| t.text == "Toggle ON").unwrap();
    assert_eq!(on.kind, ToastKind::Success);

    c.document_mut().remove_attribute(toggle, "checked");
    c.dispatch(DomEvent::change(toggle));
    let off = c.toasts().find(|t| t.text == "Toggle OFF").unwrap();
    assert_eq!(off.kind, ToastKind::Info);
}

#[test]
fn test_switch_uses_active_class() {
    let mut c = controller_with(El::new("div").class("switch active"));
    let switch = q(&c, ".switch");
    c.dispatch(DomEvent::change(switch));
    assert_eq!(toast_count(&c, "Toggle ON"), 1);
}

#[test]
fn test_badge_click_also_selects_row() {
    let mut c = page();
    let badge = q(&c, "tbody span.status-badge");
    let row = c.document().closest(badge, "tr").unwrap().unwrap();
    assert_eq!(c.document().style(badge, "cursor"), Some("pointer"));

    c.dispatch(DomEvent::click(badge));
    assert_eq!(toast_count(&c, "Status: Active"), 1);
    assert_eq!(toast_count(&c, "Row 1 selected"), 1);
    assert!(c.document().has_class(row, "selected"));
}

#[test]
fn test_progress_advances_and_caps() {
    let mut c = page();
    let bar = q(&c, ".progress-bar");
    c.dispatch(DomEvent::click(bar));
    assert_eq!(c.document().style(bar, "width"), Some("60%"));
    assert_eq!(
        c.document().style(bar, "transition"),
        Some("width 0.5s ease-out")
    );
    assert_eq!(toast_count(&c, "Progress: 60%"), 1);

    for _ in 0..3 {
        c.dispatch(DomEvent::click(bar));
    }
    assert_eq!(c.document().style(bar, "width"), Some("100%"));
    assert_eq!(toast_count(&c, "Progress: 100%"), 2);
}

#[test]
fn test_interactive_elements_flash_and_toast() {
    let mut c = controller_with(
        El::new("div")
            .child(El::new("div").class("card cursor-pointer").text("Retainer"))
            .child(El::new("div").class("list-item cursor-pointer").text("Deadline"))
            .child(El::new("div").class("clickable").text("More")),
    );
    let card = q(&c, ".card");
    assert_eq!(c.document().style(card, "cursor"), Some("pointer"));

    c.dispatch(DomEvent::click(card));
    assert_eq!(c.document().style(card, "background-color"), Some("#e5e7eb"));
    assert_eq!(toast_count(&c, "Card selected"), 1);
    c.advance(ms(200));
    assert_eq!(c.document().style(card, "background-color"), None);

    c.dispatch(DomEvent::click(q(&c, ".list-item")));
    c.dispatch(DomEvent::click(q(&c, ".clickable")));
    assert_eq!(toast_count(&c, "List item selected"), 1);
    assert_eq!(toast_count(&c, "generic action triggered"), 1);
}

#[test]
fn test_interactive_skips_elements_with_handlers() {
    let mut c = controller_with(
        El::new("table").child(
            El::new("tbody").child(
                El::new("tr")
                    .class("cursor-pointer")
                    .child(El::new("td").class("cursor-pointer").text("Acme")),
            ),
        ),
    );
    let row = q(&c, "tr");
    let cell = q(&c, "td");
    assert!(!c.is_enhanced(row, "interactive"));
    assert!(c.is_enhanced(cell, "interactive"));

    c.dispatch(DomEvent::click(cell));
    assert_eq!(toast_count(&c, "Table row selected"), 1);
    assert_eq!(toast_count(&c, "Row 1 selected"), 1);
}

