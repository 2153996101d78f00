mod conversion;
mod registration;

use std::sync::Arc;

use skk_core::dict::{CompositeDictionary, Dictionary, StaticDictionary};
use skk_core::parse_key_sequence;
use skk_core::settings::Settings;
use skk_core::user_dict::UserDictionary;

use super::Context;

pub(super) fn make_system_dict() -> Arc<dyn Dictionary> {
    Arc::new(StaticDictionary::from_surfaces(
        "system",
        vec![
            ("きょう", vec!["今日", "京", "強"]),
            ("やまだ", vec!["山田"]),
            ("かんじ", vec!["漢字", "幹事"]),
            ("かんがe", vec!["考"]),
            ("かんj", vec!["感"]),
            ("つかt", vec!["使", "遣"]),
            ("あい", vec!["愛", "藍"]),
            ("にほん", vec!["日本"]),
            ("nyc", vec!["ニューヨーク"]),
        ],
    ))
}

/// User layer first, then the static system layer.
pub(super) fn make_test_dict() -> CompositeDictionary {
    CompositeDictionary::new(vec![Arc::new(UserDictionary::new()), make_system_dict()])
}

pub(super) fn make_context() -> Context {
    Context::with_settings(make_test_dict(), Settings::builtin())
}

/// Feed a space-separated key sequence (`"K a n j i space"`), returning
/// whether each key was consumed.
pub(super) fn type_keys(ctx: &mut Context, keys: &str) -> Vec<bool> {
    parse_key_sequence(keys)
        .unwrap()
        .into_iter()
        .map(|ev| ctx.process_key_event(ev))
        .collect()
}

/// Type `keys` into a fresh context and return what it committed.
pub(super) fn commit_of(keys: &str) -> String {
    let mut ctx = make_context();
    type_keys(&mut ctx, keys);
    ctx.poll_output()
}
