use skk_core::dict::CompositeDictionary;
use skk_core::settings::Settings;

use super::*;
use crate::{InputMode, Mode};

#[test]
fn test_unknown_word_opens_registration() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space");
    assert_eq!(ctx.mode(), Mode::Registration);
    assert_eq!(ctx.active_mode(), Mode::Direct);
    assert_eq!(ctx.registration_depth(), 1);
    assert_eq!(ctx.preedit(), "▼から【】");
}

#[test]
fn test_register_and_reuse() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space a i");
    assert_eq!(ctx.preedit(), "▼から【あい】");
    assert_eq!(ctx.peek_output(), "");

    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "あい");
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.registration_depth(), 0);

    type_keys(&mut ctx, "K a r a space");
    assert_eq!(ctx.mode(), Mode::CandidateSelection);
    assert_eq!(ctx.preedit(), "▼あい");
}

#[test]
fn test_pending_tail_is_flushed_on_confirm() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space h o n");
    assert_eq!(ctx.preedit(), "▼から【ほn】");
    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "ほん");
}

#[test]
fn test_conversion_inside_registration() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space K y o u");
    assert_eq!(ctx.preedit(), "▼から【▽きょう】");
    assert_eq!(ctx.active_mode(), Mode::Composing);
    assert_eq!(ctx.composition().kana(), "きょう");

    type_keys(&mut ctx, "space space");
    assert_eq!(ctx.preedit(), "▼から【▼京】");
    assert_eq!(ctx.selection().unwrap().index, 1);

    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.preedit(), "▼から【京】");
    assert_eq!(ctx.peek_output(), "");

    type_keys(&mut ctx, "a i Return");
    assert_eq!(ctx.poll_output(), "京あい");
}

#[test]
fn test_empty_confirm_resumes_editing() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space");
    assert_eq!(type_keys(&mut ctx, "Return"), vec![true]);
    assert_eq!(ctx.mode(), Mode::Composing);
    assert_eq!(ctx.preedit(), "▽から");
    assert_eq!(ctx.poll_output(), "");
}

#[test]
fn test_nested_registration_and_total_cancel() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space K i r a space");
    assert_eq!(ctx.registration_depth(), 2);
    assert_eq!(ctx.preedit(), "▼から【▼きら【】】");

    assert_eq!(type_keys(&mut ctx, "C-g"), vec![true]);
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.registration_depth(), 0);
    assert_eq!(ctx.preedit(), "");
    assert_eq!(ctx.poll_output(), "");
}

#[test]
fn test_cancel_from_inner_composition() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space a K i Escape");
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.registration_depth(), 0);
    assert_eq!(ctx.poll_output(), "");
}

#[test]
fn test_nested_registration_completes_inside_out() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space K i r a space a Return");
    assert_eq!(ctx.registration_depth(), 1);
    assert_eq!(ctx.preedit(), "▼から【あ】");

    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "あ");
    assert_eq!(ctx.dictionary().lookup("きら")[0].surface, "あ");
    assert_eq!(ctx.dictionary().lookup("から")[0].surface, "あ");
}

#[test]
fn test_registration_depth_cap() {
    let mut settings = Settings::builtin();
    settings.limits.max_registration_depth = 1;
    let mut ctx = Context::with_settings(make_test_dict(), settings);

    type_keys(&mut ctx, "K a r a space K i r a space");
    assert_eq!(ctx.registration_depth(), 1);
    assert_eq!(ctx.active_mode(), Mode::Composing);
    assert_eq!(ctx.preedit(), "▼から【▽きら】");
}

#[test]
fn test_delete_pops_text_then_tail() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space a i BackSpace");
    assert_eq!(ctx.preedit(), "▼から【あ】");

    type_keys(&mut ctx, "k");
    assert_eq!(ctx.preedit(), "▼から【あk】");
    type_keys(&mut ctx, "BackSpace");
    assert_eq!(ctx.preedit(), "▼から【あ】");

    type_keys(&mut ctx, "BackSpace BackSpace");
    assert_eq!(ctx.mode(), Mode::Registration);
    assert_eq!(ctx.preedit(), "▼から【】");
}

#[test]
fn test_registration_without_writable_dictionary() {
    let dict = CompositeDictionary::new(vec![make_system_dict()]);
    let mut ctx = Context::with_settings(dict, Settings::builtin());

    type_keys(&mut ctx, "K a r a space a i Return");
    assert_eq!(ctx.poll_output(), "あい");

    type_keys(&mut ctx, "K a r a space");
    assert_eq!(ctx.mode(), Mode::Registration);
}

#[test]
fn test_register_word_from_selection() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space C-r");
    assert_eq!(ctx.mode(), Mode::Registration);
    assert_eq!(ctx.preedit(), "▼きょう【】");

    type_keys(&mut ctx, "a i Return");
    assert_eq!(ctx.poll_output(), "あい");

    type_keys(&mut ctx, "K y o u space");
    assert_eq!(ctx.preedit(), "▼あい");
    assert_eq!(ctx.selection().unwrap().candidates.len(), 4);
}

#[test]
fn test_register_word_respects_depth_cap() {
    let mut settings = Settings::builtin();
    settings.limits.max_registration_depth = 1;
    let mut ctx = Context::with_settings(make_test_dict(), settings);

    type_keys(&mut ctx, "K a r a space K y o u space");
    assert_eq!(ctx.active_mode(), Mode::CandidateSelection);
    assert_eq!(type_keys(&mut ctx, "C-r"), vec![true]);
    assert_eq!(ctx.active_mode(), Mode::CandidateSelection);
    assert_eq!(ctx.registration_depth(), 1);
}

#[test]
fn test_ascii_word_registration() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space l a b");
    assert_eq!(ctx.input_mode(), InputMode::Ascii);
    assert_eq!(ctx.preedit(), "▼から【ab】");

    // C-j only leaves ASCII mode here; it does not confirm.
    type_keys(&mut ctx, "C-j");
    assert_eq!(ctx.input_mode(), InputMode::Hiragana);
    assert_eq!(ctx.mode(), Mode::Registration);

    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "ab");
}

#[test]
fn test_katakana_registration_text() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a r a space q a i");
    assert_eq!(ctx.preedit(), "▼から【アイ】");
    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "アイ");
}
