use std::sync::Arc;

use skk_core::dict::{CompositeDictionary, Dictionary};
use skk_core::settings::Settings;

use super::*;
use crate::{InputMode, Mode};

#[test]
fn test_yamada_converts() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "Y a m a d a space");
    assert_eq!(ctx.mode(), Mode::CandidateSelection);
    assert_eq!(ctx.preedit(), "▼山田");
    assert_eq!(ctx.peek_output(), "");

    type_keys(&mut ctx, "Return");
    assert_eq!(ctx.poll_output(), "山田");
    assert_eq!(ctx.mode(), Mode::Direct);
    assert!(ctx.selection().is_none());
}

#[test]
fn test_immediate_commit_takes_first_candidate() {
    assert_eq!(commit_of("K y o u space Return"), "今日");
    assert_eq!(commit_of("K a n j i space Return"), "漢字");
    assert_eq!(commit_of("N i h o n space Return"), "日本");
}

#[test]
fn test_next_candidate_cycles() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space");
    let sel = ctx.selection().unwrap();
    assert_eq!(sel.index, 0);
    assert_eq!(sel.candidates.len(), 3);

    type_keys(&mut ctx, "space");
    assert_eq!(ctx.preedit(), "▼京");
    type_keys(&mut ctx, "space");
    assert_eq!(ctx.preedit(), "▼強");
    type_keys(&mut ctx, "space");
    assert_eq!(ctx.preedit(), "▼今日");
    assert_eq!(ctx.selection().unwrap().index, 0);
}

#[test]
fn test_previous_candidate_wraps() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space x");
    assert_eq!(ctx.selection().unwrap().index, 2);
    assert_eq!(ctx.preedit(), "▼強");
    type_keys(&mut ctx, "x x");
    assert_eq!(ctx.preedit(), "▼今日");
}

#[test]
fn test_full_cycle_returns_to_start() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space");
    let start = ctx.selection().unwrap().index;
    let n = ctx.selection().unwrap().candidates.len();
    for _ in 0..n {
        type_keys(&mut ctx, "space");
    }
    assert_eq!(ctx.selection().unwrap().index, start);
}

#[test]
fn test_printable_key_commits_and_continues() {
    let mut ctx = make_context();
    let consumed = type_keys(&mut ctx, "Y a m a d a space k a");
    assert!(consumed.iter().all(|c| *c));
    assert_eq!(ctx.poll_output(), "山田か");
    assert_eq!(ctx.mode(), Mode::Direct);
}

#[test]
fn test_uppercase_after_selection_starts_new_segment() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "Y a m a d a space K a");
    assert_eq!(ctx.poll_output(), "山田");
    assert_eq!(ctx.mode(), Mode::Composing);
    assert_eq!(ctx.preedit(), "▽か");
}

#[test]
fn test_unbound_key_in_selection_is_ignored() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "Y a m a d a space");
    assert_eq!(type_keys(&mut ctx, "Tab"), vec![false]);
    assert_eq!(ctx.mode(), Mode::CandidateSelection);
    assert_eq!(ctx.preedit(), "▼山田");
}

#[test]
fn test_cancel_from_selection() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space C-g");
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.preedit(), "");
    assert!(ctx.composition().is_empty());
    assert_eq!(ctx.poll_output(), "");
}

#[test]
fn test_backspace_returns_to_composing() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space BackSpace");
    assert_eq!(ctx.mode(), Mode::Composing);
    assert_eq!(ctx.preedit(), "▽きょう");
    assert_eq!(ctx.composition().kana(), "きょう");

    // Converting again starts from the top.
    type_keys(&mut ctx, "space");
    assert_eq!(ctx.preedit(), "▼今日");
}

#[test]
fn test_commit_promotes_into_user_dictionary() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space Return");
    assert_eq!(ctx.poll_output(), "京");

    type_keys(&mut ctx, "K y o u space");
    assert_eq!(ctx.preedit(), "▼京");
    let surfaces: Vec<&str> = ctx
        .selection()
        .unwrap()
        .candidates
        .iter()
        .map(|c| c.surface())
        .collect();
    assert_eq!(surfaces, vec!["京", "今日", "強"]);
}

#[test]
fn test_learning_is_shared_between_contexts() {
    let dict = make_test_dict();
    let mut a = Context::with_settings(dict.clone(), Settings::builtin());
    let mut b = Context::with_settings(dict, Settings::builtin());

    type_keys(&mut a, "K y o u space space space Return");
    assert_eq!(a.poll_output(), "強");

    type_keys(&mut b, "K y o u space Return");
    assert_eq!(b.poll_output(), "強");
}

#[test]
fn test_purge_removes_learned_candidate() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K y o u space space Return");
    ctx.poll_output();

    type_keys(&mut ctx, "K y o u space");
    assert_eq!(ctx.preedit(), "▼京");
    let consumed = type_keys(&mut ctx, "X");
    assert_eq!(consumed, vec![true]);
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.poll_output(), "");

    // Only the learned copy is gone; the system entry keeps its place.
    type_keys(&mut ctx, "K y o u space");
    assert_eq!(ctx.preedit(), "▼今日");
}

#[test]
fn test_purge_of_read_only_candidate_commits_nothing() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "Y a m a d a space X");
    assert_eq!(ctx.mode(), Mode::Direct);
    assert_eq!(ctx.poll_output(), "");
    assert_eq!(commit_of("Y a m a d a space Return"), "山田");
}

#[test]
fn test_read_only_dictionaries_still_convert() {
    let dict = CompositeDictionary::new(vec![make_system_dict()]);
    let mut ctx = Context::with_settings(dict, Settings::builtin());
    type_keys(&mut ctx, "K y o u space space Return");
    assert_eq!(ctx.poll_output(), "京");
    type_keys(&mut ctx, "K y o u space Return");
    assert_eq!(ctx.poll_output(), "今日");
}

#[test]
fn test_priority_order_of_layers() {
    let extra: Arc<dyn Dictionary> = Arc::new(skk_core::dict::StaticDictionary::from_surfaces(
        "extra",
        vec![("やまだ", vec!["山陀", "山田"])],
    ));
    let dict = CompositeDictionary::new(vec![extra, make_system_dict()]);
    let mut ctx = Context::with_settings(dict, Settings::builtin());
    type_keys(&mut ctx, "Y a m a d a space");
    let sel = ctx.selection().unwrap();
    assert_eq!(sel.candidates.len(), 2);
    assert_eq!(sel.current().surface(), "山陀");
}

#[test]
fn test_katakana_mode_still_looks_up_hiragana() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "q Y a m a d a");
    assert_eq!(ctx.input_mode(), InputMode::Katakana);
    assert_eq!(ctx.preedit(), "▽ヤマダ");
    assert_eq!(ctx.composition().kana(), "やまだ");
    type_keys(&mut ctx, "space Return");
    assert_eq!(ctx.poll_output(), "山田");
}

#[test]
fn test_convert_with_held_n() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "N i h o n space");
    assert_eq!(ctx.preedit(), "▼日本");
}

#[test]
fn test_selection_view_current() {
    let mut ctx = make_context();
    type_keys(&mut ctx, "K a n j i space space");
    let sel = ctx.selection().unwrap();
    assert_eq!(sel.current().surface(), "幹事");
    assert_eq!(sel.current().key.yomi(), "かんじ");
}
