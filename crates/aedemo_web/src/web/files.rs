use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Offer `text` as a file download through a temporary object URL.
pub(super) fn download_text(filename: &str, mime: &str, text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let document = window.document().ok_or("no document".to_string())?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(text));
    let opts = web_sys::BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "blob: failed to create".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "url: create_object_url failed".to_string())?;

    let a = document
        .create_element("a")
        .map_err(|_| "document: create_element failed".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "document: anchor cast failed".to_string())?;

    a.set_href(&url);
    a.set_download(filename);
    a.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// First file selected in an `<input type="file">` change event.
pub(super) fn first_selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0);
    // Clear so picking the same file again still fires `change`.
    input.set_value("");
    file
}

pub(super) async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let promise = file_reader_text_promise(file)?;
    let v = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| "file: read failed".to_string())?;
    v.as_string()
        .ok_or_else(|| "file: expected text".to_string())
}

fn file_reader_text_promise(file: web_sys::File) -> Result<js_sys::Promise, String> {
    let reader =
        web_sys::FileReader::new().map_err(|_| "file: FileReader::new failed".to_string())?;
    reader
        .read_as_text(&file)
        .map_err(|_| "file: read_as_text failed".to_string())?;

    Ok(js_sys::Promise::new(&mut |resolve, reject| {
        let reject_load = reject.clone();
        let reject_err = reject;
        let reader_ok = reader.clone();
        let onload =
            Closure::wrap(Box::new(
                move |_ev: web_sys::ProgressEvent| match reader_ok.result() {
                    Ok(v) if v.is_string() => {
                        let _ = resolve.call1(&JsValue::UNDEFINED, &v);
                    }
                    Ok(_) => {
                        let _ = reject_load.call1(
                            &JsValue::UNDEFINED,
                            &JsValue::from_str("file: missing result"),
                        );
                    }
                    Err(_) => {
                        let _ = reject_load.call1(
                            &JsValue::UNDEFINED,
                            &JsValue::from_str("file: result() threw"),
                        );
                    }
                },
            ) as Box<dyn FnMut(_)>);
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::wrap(Box::new(move |_ev: web_sys::ProgressEvent| {
            let _ = reject_err.call1(&JsValue::UNDEFINED, &JsValue::from_str("file: read error"));
        }) as Box<dyn FnMut(_)>);
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }))
}
