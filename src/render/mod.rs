//! Markup fragments for the option wheel.
//!
//! Pure functions: domain data in, HTML string out. User-supplied text is
//! escaped; numbers are rendered as-is. Interactive elements carry the
//! `data-*` markers that [`crate::bridge::UiAction`] recognizes.

mod format;

pub use format::{escape_html, format_duration, probability, weight_band};

use crate::option::WheelOption;
use crate::store::total_weight;

/// Placeholder when the list has no entries.
pub const EMPTY_LIST: &str =
    r#"<div class="text-white/50 text-center py-8">No options yet. Add your first option above!</div>"#;

/// The option list, or the empty placeholder.
pub fn options_list(options: &[WheelOption]) -> String {
    if options.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let total = total_weight(options);
    options.iter().map(|o| option_row(o, total)).collect()
}

/// One row of the option list. `total` is the weight of the listed set.
pub fn option_row(option: &WheelOption, total: u32) -> String {
    let id = escape_html(&option.id);

    let tags = if option.tags.is_empty() {
        String::new()
    } else {
        let chips: String = option
            .tags
            .iter()
            .map(|tag| {
                format!(
                    r#"<span class="inline-flex items-center px-2 py-0.5 rounded-full text-xs bg-purple-500/20 text-purple-200 border border-purple-500/30">{}</span>"#,
                    escape_html(tag)
                )
            })
            .collect();
        format!(r#"<div class="flex gap-1 flex-wrap">{}</div>"#, chips)
    };

    let duration = option
        .duration
        .map(|d| format!(r#"<span class="text-white/70 text-sm">⏱ {}</span>"#, format_duration(d)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div id="option-{id}" class="bg-white/10 backdrop-blur-sm rounded-lg p-4 border border-white/20 hover:bg-white/20 transition-all {band}">"#,
            r#"<div class="flex items-center justify-between">"#,
            r#"<div class="flex items-center gap-3 flex-wrap">"#,
            r#"<span class="text-white font-medium">{text}</span>{tags}{duration}"#,
            r#"</div>"#,
            r#"<div class="flex items-center gap-2">"#,
            r#"<div class="text-blue-200 text-sm">{probability}%</div>"#,
            r#"<button data-delete-option="{id}" class="p-2 hover:bg-red-500/20 rounded-lg transition-colors text-red-300" aria-label="Delete">✕</button>"#,
            r#"<button data-expand-option="{id}" class="p-2 hover:bg-white/20 rounded-lg transition-colors text-white/70 hover:text-white" aria-label="Expand">▾</button>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        id = id,
        band = weight_band(option.weight),
        text = escape_html(&option.text),
        tags = tags,
        duration = duration,
        probability = probability(option.weight, total),
    )
}

/// The result card for a selected option.
///
/// `current` is the option set the probability is computed against.
pub fn result_card(option: &WheelOption, current: &[WheelOption]) -> String {
    let duration = option
        .duration
        .map(|d| format!(r#"<span class="badge">⏱ {}</span>"#, format_duration(d)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="bg-white/15 backdrop-blur-md rounded-2xl p-8 border border-white/30 shadow-2xl animate-scale-in" id="result-card">"#,
            r#"<div class="text-center space-y-5">"#,
            r#"<div class="text-white/70 text-sm uppercase tracking-wider font-medium">🎯 Your Decision:</div>"#,
            r#"<div class="text-5xl md:text-6xl font-bold py-2">{text}</div>"#,
            r#"<div class="flex justify-center gap-3 flex-wrap">{duration}<span class="badge">{probability}%</span></div>"#,
            r#"<div class="pt-2">"#,
            r#"<button data-dismiss-result class="px-8 py-3 text-white font-semibold rounded-xl">Got it!</button>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        text = escape_html(&option.text),
        duration = duration,
        probability = probability(option.weight, total_weight(current)),
    )
}

/// Shown when no option survives the filters. `ceiling` is the time
/// constraint that was applied, if any.
pub fn no_options(ceiling: Option<u16>) -> String {
    let within = match ceiling {
        Some(minutes) if minutes > 0 => format_duration(minutes),
        _ => "any time".to_string(),
    };

    format!(
        concat!(
            r#"<div class="bg-white/15 backdrop-blur-md rounded-2xl p-8 border border-white/30 shadow-2xl animate-scale-in" id="result-card">"#,
            r#"<div class="text-center space-y-5">"#,
            r#"<div class="text-white/70 text-sm uppercase tracking-wider font-medium">🤷 No Options Available</div>"#,
            r#"<div class="text-3xl md:text-4xl font-bold py-2">No options available within {within}</div>"#,
            r#"<div class="text-white/70 text-base">Try increasing your time constraint or clearing the filter</div>"#,
            r#"<div class="pt-2">"#,
            r#"<button data-dismiss-result class="px-8 py-3 text-white font-semibold rounded-xl">Got it!</button>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        within = within,
    )
}

/// The entry form for new options.
pub fn add_option_form() -> String {
    concat!(
        r#"<form data-add-option-form class="flex-1 flex flex-col gap-2">"#,
        r#"<div class="flex gap-2">"#,
        r#"<input type="text" name="text" placeholder="Enter new activity..." required class="flex-1 px-4 py-2 rounded-lg"/>"#,
        r#"<button type="submit" class="bg-green-500 hover:bg-green-600 text-white px-6 py-2 rounded-lg">Add</button>"#,
        r#"</div>"#,
        r#"<input type="text" name="tags" placeholder="Tags (comma-separated, max 5)..." maxlength="100" class="px-4 py-2 rounded-lg text-sm"/>"#,
        r#"</form>"#,
    )
    .to_string()
}

/// The management modal: list container plus entry form.
///
/// `list_target` is the id of the element the list is rendered into, so
/// later adds and deletes can replace just that region.
pub fn manage_modal(options: &[WheelOption], list_target: &str) -> String {
    format!(
        concat!(
            r#"<div class="fixed inset-0 bg-black/60 backdrop-blur-sm flex items-center justify-center p-4 z-50">"#,
            r#"<div class="bg-white/10 backdrop-blur-md rounded-2xl border border-white/30 max-w-2xl w-full max-h-[80vh] overflow-hidden modal-animate">"#,
            r#"<div class="p-6 border-b border-white/20">"#,
            r#"<div class="flex items-center justify-between">"#,
            r#"<h2 class="text-2xl font-bold text-white">Manage Options</h2>"#,
            r#"<button data-close-modal class="text-white/70 hover:text-white text-2xl transition-colors">×</button>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"<div class="p-6 overflow-y-auto max-h-[50vh]">"#,
            r#"<div class="space-y-3" id="{list_target}">{list}</div>"#,
            r#"</div>"#,
            r#"<div class="p-6 border-t border-white/20"><div class="flex gap-3 mb-4">{form}</div></div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        list_target = escape_html(list_target),
        list = options_list(options),
        form = add_option_form(),
    )
}
