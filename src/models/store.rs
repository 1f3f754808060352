use dashmap::DashMap;
use poise::serenity_prelude as serenity;

use crate::models::guild::GuildConfig;

/// Storage of per-guild configurations.
///
/// Handlers only ever go through this trait, so a persistent backend can be
/// swapped in without touching call sites. `get_or_create` never returns a
/// missing value.
pub trait ConfigStore: Send + Sync {
    fn get_or_create(&self, guild_id: serenity::GuildId) -> GuildConfig;
    fn set(&self, guild_id: serenity::GuildId, config: GuildConfig);
}

/// In-memory store; lives for the process lifetime, one record per guild
/// the bot ever served. No eviction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: DashMap<serenity::GuildId, GuildConfig>,
}

impl ConfigStore for MemoryStore {
    fn get_or_create(&self, guild_id: serenity::GuildId) -> GuildConfig {
        self.configs
            .entry(guild_id)
            .or_insert_with(GuildConfig::default)
            .clone()
    }

    fn set(&self, guild_id: serenity::GuildId, config: GuildConfig) {
        self.configs.insert(guild_id, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_inserts_default() {
        let store = MemoryStore::default();
        let guild = serenity::GuildId::new(1);

        let config = store.get_or_create(guild);
        assert_eq!(config, GuildConfig::default());

        // A second read returns the stored record, not a new default
        let again = store.get_or_create(guild);
        assert_eq!(again, config);
    }

    #[test]
    fn test_set_replaces_record() {
        let store = MemoryStore::default();
        let guild = serenity::GuildId::new(1);

        let mut config = store.get_or_create(guild);
        config.embed_title = "T".to_string();
        config.embed_description = "D".to_string();
        config.embed_color = "#112233".to_string();
        config.button_label = "B".to_string();
        store.set(guild, config);

        let read = store.get_or_create(guild);
        assert_eq!(read.embed_title, "T");
        assert_eq!(read.embed_description, "D");
        assert_eq!(read.embed_color, "#112233");
        assert_eq!(read.button_label, "B");
    }

    #[test]
    fn test_guilds_are_isolated() {
        let store = MemoryStore::default();
        let mut config = store.get_or_create(serenity::GuildId::new(1));
        config.welcome_message = "changed".to_string();
        store.set(serenity::GuildId::new(1), config);

        let other = store.get_or_create(serenity::GuildId::new(2));
        assert_eq!(other, GuildConfig::default());
    }
}
