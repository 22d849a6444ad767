use std::path::PathBuf;

use configs::DomainConfig;
use models::{GiftEntry, NewUser, Timestamp};
use serde_json::json;
use service::{RecordStores, StoreError};
use uuid::Uuid;

struct Fixture {
    dir: PathBuf,
    user_file: PathBuf,
    gift_file: PathBuf,
}

impl Fixture {
    fn new() -> Result<Self, anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("record_stores_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir)?;
        let user_file = dir.join("user.json");
        let gift_file = dir.join("gift.json");
        std::fs::write(&user_file, b"")?;
        std::fs::write(&gift_file, b"")?;
        Ok(Self { dir, user_file, gift_file })
    }

    fn open(&self) -> Result<RecordStores, StoreError> {
        RecordStores::open(&self.user_file, &self.gift_file, DomainConfig::default())
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn duplicate_username_keeps_first_record() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;

    let first = stores.users.create(NewUser::new("lihua", "admin"))?;
    let before = std::fs::read(&fx.user_file)?;

    let again = stores.users.create(NewUser::new("lihua", "normal"));
    assert!(matches!(again, Err(StoreError::UserExists(ref name)) if name == "lihua"));
    assert_eq!(std::fs::read(&fx.user_file)?, before);
    assert_eq!(stores.users.get("lihua")?, Some(first));
    Ok(())
}

#[test]
fn missing_role_leaves_file_byte_identical() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    stores.users.create(NewUser::new("amy", "normal"))?;
    let before = std::fs::read(&fx.user_file)?;

    let input = NewUser { username: Some("bob".into()), ..Default::default() };
    assert!(matches!(stores.users.create(input), Err(StoreError::MissingField("role"))));
    assert_eq!(std::fs::read(&fx.user_file)?, before);
    Ok(())
}

#[test]
fn change_role_not_found_and_invalid() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    stores.users.create(NewUser::new("amy", "normal"))?;
    let before = std::fs::read(&fx.user_file)?;

    assert!(!stores.users.change_role("nobody", "admin")?);
    assert_eq!(std::fs::read(&fx.user_file)?, before);

    let bad = stores.users.change_role("amy", "superuser");
    assert!(matches!(bad, Err(StoreError::InvalidRole(ref r)) if r == "superuser"));
    assert_eq!(std::fs::read(&fx.user_file)?, before);
    Ok(())
}

#[test]
fn toggle_twice_restores_flag_and_advances_update_time() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    let created = stores.users.create(NewUser::new("amy", "normal"))?;

    assert_eq!(stores.users.toggle_active("amy")?, Some(false));
    let after_first = stores.users.get("amy")?.expect("amy");
    assert_eq!(stores.users.toggle_active("amy")?, Some(true));
    let after_second = stores.users.get("amy")?.expect("amy");

    assert!(after_second.active);
    assert!(after_first.update_time > created.update_time);
    assert!(after_second.update_time > after_first.update_time);
    assert_eq!(after_second.create_time, created.create_time);
    Ok(())
}

#[test]
fn delete_returns_removed_record() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    let created = stores.users.create(NewUser::new("amy", "admin").with_attr("team", "ops"))?;
    stores.users.create(NewUser::new("bob", "normal"))?;

    assert_eq!(stores.users.delete("amy")?, Some(created));
    assert!(stores.users.delete("amy")?.is_none());
    let remaining: Vec<_> = stores.users.list(false)?.into_keys().collect();
    assert_eq!(remaining, vec!["bob".to_string()]);
    Ok(())
}

#[test]
fn gift_counts_accumulate_and_clamp() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;

    stores.gifts.add_gift("level1", "level2", "iphone", 5)?;
    stores.gifts.add_gift("level1", "level2", "iphone", 3)?;
    stores.gifts.add_gift("level2", "level1", "mug", -1)?;

    let inv = stores.gifts.inventory()?;
    assert_eq!(inv.gift("level1", "level2", "iphone"), Some(&GiftEntry { name: "iphone".into(), count: 8 }));
    assert_eq!(inv.gift("level2", "level1", "mug").map(|g| g.count), Some(1));
    Ok(())
}

#[test]
fn negative_count_matches_count_of_one() -> Result<(), anyhow::Error> {
    let a = Fixture::new()?;
    let b = Fixture::new()?;
    a.open()?.gifts.add_gift("level3", "level1", "pen", -1)?;
    b.open()?.gifts.add_gift("level3", "level1", "pen", 1)?;
    assert_eq!(std::fs::read(&a.gift_file)?, std::fs::read(&b.gift_file)?);
    Ok(())
}

#[test]
fn invalid_first_level_leaves_inventory_untouched() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    stores.gifts.add_gift("level1", "level1", "book", 2)?;
    let before = std::fs::read(&fx.gift_file)?;

    let res = stores.gifts.add_gift("level9", "level1", "book", 2);
    assert!(matches!(res, Err(StoreError::InvalidLevel { .. })));
    assert_eq!(std::fs::read(&fx.gift_file)?, before);
    Ok(())
}

#[test]
fn reopening_does_not_reseed() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    fx.open()?.gifts.add_gift("level2", "level2", "kite", 4)?;
    let before = std::fs::read(&fx.gift_file)?;

    let stores = fx.open()?;
    assert!(!stores.gifts.bootstrap()?);
    assert_eq!(std::fs::read(&fx.gift_file)?, before);
    assert_eq!(stores.gifts.inventory()?.gift("level2", "level2", "kite").map(|g| g.count), Some(4));
    Ok(())
}

#[test]
fn users_round_trip_through_file() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;

    let mut created = Vec::new();
    for i in 0..5 {
        let role = if i % 2 == 0 { "admin" } else { "normal" };
        let rec = stores.users.create(NewUser::new(format!("user{i}"), role).with_attr("seq", i))?;
        created.push(rec);
    }

    // a fresh binding reads what the first one wrote
    let reopened = fx.open()?;
    let raw = reopened.users.list(false)?;
    assert_eq!(raw.len(), 5);
    for rec in &created {
        let view = &raw[&rec.username];
        assert_eq!(view.role, rec.role);
        assert!(view.active);
        assert_eq!(view.create_time, Timestamp::Instant(rec.create_time));
        assert_eq!(view.update_time, Timestamp::Instant(rec.update_time));
        assert_eq!(view.extra, rec.extra);
        assert_eq!(reopened.users.get(&rec.username)?.as_ref(), Some(rec));
    }

    let formatted = reopened.users.list(true)?;
    let view = &formatted["user0"];
    assert!(matches!(view.create_time, Timestamp::Display(ref s) if s.len() == 19));
    assert_eq!(view.extra.get("seq"), Some(&json!(0)));
    Ok(())
}

#[test]
fn corrupt_file_is_reported_not_repaired() -> Result<(), anyhow::Error> {
    let fx = Fixture::new()?;
    let stores = fx.open()?;
    std::fs::write(&fx.user_file, b"{\"amy\": ")?;

    assert!(matches!(stores.users.list(false), Err(StoreError::Corrupt { .. })));
    assert!(matches!(stores.users.create(NewUser::new("bob", "admin")), Err(StoreError::Corrupt { .. })));
    assert_eq!(std::fs::read(&fx.user_file)?, b"{\"amy\": ");

    std::fs::remove_file(&fx.user_file)?;
    assert!(matches!(stores.users.list(false), Err(StoreError::NotFound(_))));
    Ok(())
}
