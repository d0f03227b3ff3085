//! Formatting templates, registered per locale.
//!
//! Templates live in code rather than in the JSON resources. Each is a pure
//! function of its single argument.

use crate::locale::Locale;
use crate::plural::PluralCategory;
use crate::value::{FormatArg, Template};

/// Keys whose value is a [`Template`] in every locale that defines them.
pub const TEMPLATE_KEYS: [&str; 8] = [
    "collection.add.to",
    "share.link.valid",
    "settings.cancel_subscription_and_account.period.end",
    "settings.cancel_account.marked",
    "settings.cancel_account.marked.in.days",
    "settings.up.to.users",
    "settings.invite_to_account.description",
    "settings.member.of",
];

/// Templates defined directly by `locale` (inherited ones are not repeated).
#[must_use]
pub fn templates_for(locale: Locale) -> &'static [(&'static str, Template)] {
    match locale {
        Locale::EnUs => &EN_US,
        Locale::DeDe => &DE_DE,
        Locale::DeAt => &[],
    }
}

static EN_US: [(&str, Template); 8] = [
    ("collection.add.to", Template::new(en::collection_add_to)),
    ("share.link.valid", Template::new(en::share_link_valid)),
    (
        "settings.cancel_subscription_and_account.period.end",
        Template::new(en::period_end),
    ),
    ("settings.cancel_account.marked", Template::new(en::marked)),
    (
        "settings.cancel_account.marked.in.days",
        Template::new(en::marked_in_days),
    ),
    ("settings.up.to.users", Template::new(en::up_to_users)),
    (
        "settings.invite_to_account.description",
        Template::new(en::invite_description),
    ),
    ("settings.member.of", Template::new(en::member_of)),
];

static DE_DE: [(&str, Template); 8] = [
    ("collection.add.to", Template::new(de::collection_add_to)),
    ("share.link.valid", Template::new(de::share_link_valid)),
    (
        "settings.cancel_subscription_and_account.period.end",
        Template::new(de::period_end),
    ),
    ("settings.cancel_account.marked", Template::new(de::marked)),
    (
        "settings.cancel_account.marked.in.days",
        Template::new(de::marked_in_days),
    ),
    ("settings.up.to.users", Template::new(de::up_to_users)),
    (
        "settings.invite_to_account.description",
        Template::new(de::invite_description),
    ),
    ("settings.member.of", Template::new(de::member_of)),
];

mod en {
    use super::{FormatArg, PluralCategory};

    pub(super) fn collection_add_to(name: FormatArg<'_>) -> String {
        format!("Add to album '{name}'")
    }

    pub(super) fn share_link_valid(valid_until: FormatArg<'_>) -> String {
        format!("Sharing link, valid until {valid_until}")
    }

    pub(super) fn period_end(period_end: FormatArg<'_>) -> String {
        format!(
            "You can cancel your subscription now. Please note that your subscription will continue until <span class='text-brand font-bold text-lg whitespace-nowrap'>{period_end}</span>. Please make sure you have backed up your data by this date!"
        )
    }

    pub(super) fn marked(cancellation_at: FormatArg<'_>) -> String {
        format!(
            "Your account will be deleted on <span class='text-red-600 font-bold text-lg whitespace-nowrap'>{cancellation_at}</span>!"
        )
    }

    pub(super) fn marked_in_days(days: FormatArg<'_>) -> String {
        let suffix = PluralCategory::of(days).select("", "s");
        format!(
            "Your account will be deleted in <span class='text-red-600 font-bold text-lg whitespace-nowrap'>{days}</span> day{suffix}!"
        )
    }

    pub(super) fn up_to_users(count: FormatArg<'_>) -> String {
        format!("Up to {count} users")
    }

    pub(super) fn invite_description(available: FormatArg<'_>) -> String {
        let places = PluralCategory::of(available).select("place", "places");
        format!(
            "There are still <span class='font-bold text-brand'>{available}</span> free {places}. Add new members to your account."
        )
    }

    pub(super) fn member_of(name: FormatArg<'_>) -> String {
        format!("You use {name}'s subscription.")
    }
}

mod de {
    use super::{FormatArg, PluralCategory};

    pub(super) fn collection_add_to(name: FormatArg<'_>) -> String {
        format!("Zum Album '{name}' hinzufügen")
    }

    pub(super) fn share_link_valid(valid_until: FormatArg<'_>) -> String {
        format!("Linkfreigabe, gültig bis {valid_until}")
    }

    pub(super) fn period_end(period_end: FormatArg<'_>) -> String {
        format!(
            "Du kannst dein Abo jetzt kündigen. Beachte, dass dein Abo dann noch bis zum <span class='text-brand font-bold text-lg whitespace-nowrap'>{period_end}</span> weiterläuft. Bitte stelle sicher, dass du deine Daten bis zu diesem Datum gesichert hast!"
        )
    }

    pub(super) fn marked(cancellation_at: FormatArg<'_>) -> String {
        format!(
            "Dein Konto wird am <span class='text-red-600 font-bold text-lg whitespace-nowrap'>{cancellation_at}</span> gelöscht!"
        )
    }

    pub(super) fn marked_in_days(days: FormatArg<'_>) -> String {
        let suffix = PluralCategory::of(days).select("", "en");
        format!(
            "Dein Konto wird in <span class='text-red-600 font-bold text-lg whitespace-nowrap'>{days}</span> Tag{suffix} gelöscht!"
        )
    }

    pub(super) fn up_to_users(count: FormatArg<'_>) -> String {
        format!("Bis zu {count} User")
    }

    pub(super) fn invite_description(available: FormatArg<'_>) -> String {
        let places = PluralCategory::of(available).select("freien Platz", "freie Plätze");
        format!(
            "Es gibt noch <span class='font-bold text-brand text-xl'>{available}</span> {places}. Füge neue Mitglieder deinem Konto hinzu. Sende eine Einladung."
        )
    }

    pub(super) fn member_of(name: FormatArg<'_>) -> String {
        format!("Du nutzt das Abo von {name} mit.")
    }
}
