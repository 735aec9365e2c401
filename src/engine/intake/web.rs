use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, FileReader, HtmlInputElement, ProgressEvent};

use super::file_gate::{SubmittedFile, extension_accepted};
use super::{IntakeMessage, IntakeQueue};

/// Installs the DOM listeners that feed the intake queue: page-wide
/// drag-drop plus an optional `#file-input` picker element provided by the
/// host page. Listeners live for the page lifetime.
pub fn setup_dom_intake(queue: Res<IntakeQueue>) {
    // Own a queue handle the 'static DOM closures can hold on to.
    let queue = (*queue).clone();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // Dragover must be cancelled for the drop event to fire at all.
    let on_dragover = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
    }) as Box<dyn FnMut(DragEvent)>);
    let _ = document
        .add_event_listener_with_callback("dragover", on_dragover.as_ref().unchecked_ref());
    on_dragover.forget();

    let drop_queue = queue.clone();
    let on_drop = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        let Some(transfer) = event.data_transfer() else {
            return;
        };
        let Some(files) = transfer.files() else {
            return;
        };
        if let Some(file) = files.get(0) {
            submit_file(&drop_queue, file);
        }
    }) as Box<dyn FnMut(DragEvent)>);
    let _ = document.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref());
    on_drop.forget();

    if let Some(element) = document.get_element_by_id("file-input") {
        if let Ok(input) = element.dyn_into::<HtmlInputElement>() {
            let picker_queue = queue.clone();
            let picker_input = input.clone();
            let on_change = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(file) = picker_input.files().and_then(|files| files.get(0)) {
                    submit_file(&picker_queue, file);
                }
            }) as Box<dyn FnMut(Event)>);
            let _ =
                input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
            on_change.forget();
        }
    }
}

/// Gate the file name, then read the blob asynchronously with progress.
fn submit_file(queue: &IntakeQueue, file: web_sys::File) {
    let name = file.name();

    if !extension_accepted(&name) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .alert_with_message("Unsupported file format. Please select only GLB files.");
        }
        queue.push(IntakeMessage::Rejected { name });
        return;
    }

    let Ok(reader) = FileReader::new() else {
        return;
    };

    queue.push(IntakeMessage::ReadStarted { name: name.clone() });

    let progress_queue = queue.clone();
    let on_progress = Closure::wrap(Box::new(move |event: ProgressEvent| {
        // An unknown total would make the fraction meaningless; skip it.
        if event.length_computable() && event.total() > 0.0 {
            let fraction = (event.loaded() / event.total()) as f32;
            progress_queue.push(IntakeMessage::ReadProgress { fraction });
        }
    }) as Box<dyn FnMut(ProgressEvent)>);
    reader.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
    on_progress.forget();

    let load_queue = queue.clone();
    let load_reader = reader.clone();
    let load_name = name.clone();
    let on_load = Closure::wrap(Box::new(move |_event: Event| {
        let Ok(result) = load_reader.result() else {
            return;
        };
        let array = js_sys::Uint8Array::new(&result);
        let mut bytes = vec![0u8; array.length() as usize];
        array.copy_to(&mut bytes);
        load_queue.push(IntakeMessage::Submitted(SubmittedFile {
            name: load_name.clone(),
            bytes,
        }));
    }) as Box<dyn FnMut(Event)>);
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let error_queue = queue.clone();
    let error_name = name.clone();
    let on_error = Closure::wrap(Box::new(move |_event: Event| {
        web_sys::console::error_1(&format!("Failed to read {error_name}").into());
        error_queue.push(IntakeMessage::ReadFailed {
            name: error_name.clone(),
        });
    }) as Box<dyn FnMut(Event)>);
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    if reader.read_as_array_buffer(&file).is_err() {
        queue.push(IntakeMessage::ReadFailed { name });
    }
}
