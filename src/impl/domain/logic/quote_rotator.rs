use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::entities::{CustomQuote, Frequency, QuoteSettings, SelectedQuote};

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// One quote per week of the year.
pub const BUILTIN_QUOTES: [&str; 52] = [
    "A penny saved is a penny earned. - Benjamin Franklin",
    "It's not how much money you make, but how much money you keep. - Robert Kiyosaki",
    "The habit of saving is itself an education. - T.T. Munger",
    "Don't save what is left after spending; spend what is left after saving. - Warren Buffett",
    "Small amounts saved daily add up to huge investments over time. - Unknown",
    "Financial peace isn't the acquisition of stuff. It's learning to live on less than you make. - Dave Ramsey",
    "The real measure of your wealth is how much you'd be worth if you lost all your money. - Anonymous",
    "Money is only a tool. It will take you wherever you wish, but it will not replace you as the driver. - Ayn Rand",
    "The stock market is filled with individuals who know the price of everything, but the value of nothing. - Philip Fisher",
    "An investment in knowledge pays the best interest. - Benjamin Franklin",
    "The best time to plant a tree was 20 years ago. The second best time is now. - Chinese Proverb",
    "Do not put all your eggs in one basket. - Proverb",
    "Rich people have small TVs and big libraries, and poor people have small libraries and big TVs. - Zig Ziglar",
    "The goal isn't more money. The goal is living life on your terms. - Chris Brogan",
    "Wealth consists not in having great possessions, but in having few wants. - Epictetus",
    "Time is more valuable than money. You can get more money, but you cannot get more time. - Jim Rohn",
    "The quickest way to double your money is to fold it in half and put it in your back pocket. - Frank Hubbard",
    "Money grows on the tree of persistence. - Japanese Proverb",
    "A budget is telling your money where to go instead of wondering where it went. - Dave Ramsey",
    "The art is not in making money, but in keeping it. - Proverb",
    "Beware of little expenses. A small leak will sink a great ship. - Benjamin Franklin",
    "Money is a terrible master but an excellent servant. - P.T. Barnum",
    "The lack of money is the root of all evil. - Mark Twain",
    "Formal education will make you a living; self-education will make you a fortune. - Jim Rohn",
    "The person who doesn't know where his next dollar is coming from usually doesn't know where his last dollar went. - Unknown",
    "If you would be wealthy, think of saving as well as getting. - Benjamin Franklin",
    "Money never made a man happy yet, nor will it. The more a man has, the more he wants. - Benjamin Franklin",
    "The safe way to double your money is to fold it over once and put it in your pocket. - Frank Hubbard",
    "Wealth is not about having a lot of money; it's about having a lot of options. - Chris Rock",
    "The most important investment you can make is in yourself. - Warren Buffett",
    "Don't work for money; make money work for you. - Robert Kiyosaki",
    "The way to get started is to quit talking and begin doing. - Walt Disney",
    "Financial freedom is available to those who learn about it and work for it. - Robert Kiyosaki",
    "It's not what you earn, it's what you keep. - Unknown",
    "The first rule of compounding: Never interrupt it unnecessarily. - Charlie Munger",
    "Price is what you pay. Value is what you get. - Warren Buffett",
    "The biggest risk is not taking any risk. - Mark Zuckerberg",
    "Your net worth to the network is your net worth. - Tim O'Reilly",
    "Money is multiplied in practical value depending on the number of W's you control in your life: what you do, when you do it, where you do it, and with whom you do it. - Tim Ferriss",
    "The four most expensive words in the English language are 'This time it's different.' - Sir John Templeton",
    "Compound interest is the eighth wonder of the world. He who understands it, earns it; he who doesn't, pays it. - Albert Einstein",
    "Risk comes from not knowing what you're doing. - Warren Buffett",
    "The stock market is a device for transferring money from the impatient to the patient. - Warren Buffett",
    "Never spend your money before you have earned it. - Thomas Jefferson",
    "A wise person should have money in their head, but not in their heart. - Jonathan Swift",
    "Money is not the most important thing in the world. Love is. Fortunately, I love money. - Jackie Mason",
    "The real measure of your wealth is how much you'd be worth if you lost all your money. - Anonymous",
    "Every time you borrow money, you're robbing your future self. - Nathan W. Morris",
    "The habit of saving is itself an education; it fosters every virtue, teaches self-denial, cultivates the sense of order, trains to forethought, and so broadens the mind. - T.T. Munger",
    "Money is only a tool. It will take you wherever you wish, but it will not replace you as the driver. - Ayn Rand",
    "The secret to wealth is simple: Find a way to do more for others than anyone else does. - Tony Robbins",
    "Success is not just about what you accomplish in your life, it's about what you inspire others to do. - Unknown",
];

pub const SAVINGS_TIPS: [&str; 20] = [
    "Try the 50/30/20 rule: 50% needs, 30% wants, 20% savings",
    "Use the envelope method for discretionary spending",
    "Automate your savings to make it effortless",
    "Review subscriptions monthly and cancel unused ones",
    "Cook at home more often to reduce food expenses",
    "Compare prices before making large purchases",
    "Set up a separate emergency fund for unexpected expenses",
    "Use cashback apps and credit cards responsibly",
    "Buy generic brands instead of name brands",
    "Plan your meals and make a grocery list",
    "Use public transportation or carpool when possible",
    "Take advantage of free entertainment options",
    "Negotiate bills like phone, internet, and insurance",
    "Buy items during sales and use coupons",
    "Consider buying used items for big purchases",
    "Track your spending to identify money leaks",
    "Set up automatic transfers to savings accounts",
    "Use the 24-hour rule before making impulse purchases",
    "Invest in energy-efficient appliances to save long-term",
    "Consider a side hustle to increase income",
];

/// Week of the year, counted from 1 and restarting every January 1st:
/// `ceil((days since Jan 1 + weekday of Jan 1 + 1) / 7)`, Sunday = 0.
///
/// This is not ISO-8601 numbering. The last days of December can land in
/// week 53 right before January 1st restarts at week 1.
pub fn week_number(now: NaiveDateTime) -> u32 {
    let jan_1 = now.date().with_ordinal(1).expect("ordinal 1 exists in every year");
    let past_days =
        (now - jan_1.and_time(NaiveTime::MIN)).num_milliseconds() as f64 / MS_PER_DAY;
    let weekday = jan_1.weekday().num_days_from_sunday() as f64;
    ((past_days + weekday + 1.0) / 7.0).ceil() as u32
}

/// Savings tip of the day.
pub fn savings_tip(date: NaiveDate) -> &'static str {
    SAVINGS_TIPS[date.ordinal0() as usize % SAVINGS_TIPS.len()]
}

pub(crate) struct QuoteRotator<'a> {
    builtins: &'a [&'static str],
    custom_quotes: &'a [CustomQuote],
    settings: &'a QuoteSettings,
}

impl<'a> QuoteRotator<'a> {
    pub(crate) fn new(custom_quotes: &'a [CustomQuote], settings: &'a QuoteSettings) -> Self {
        Self::with_builtins(&BUILTIN_QUOTES, custom_quotes, settings)
    }

    pub(crate) fn with_builtins(
        builtins: &'a [&'static str],
        custom_quotes: &'a [CustomQuote],
        settings: &'a QuoteSettings,
    ) -> Self {
        Self {
            builtins,
            custom_quotes,
            settings,
        }
    }

    /// Quote for the period containing `now`, or `None` when the pool is
    /// empty.
    pub(crate) fn select(&self, now: NaiveDateTime) -> Option<SelectedQuote> {
        let week_number = week_number(now);
        let (builtins, custom) = self.pool();
        let total = builtins.len() + custom.len();
        if total == 0 {
            return None;
        }

        let period = match self.settings.change_frequency {
            Frequency::Daily => now.ordinal(),
            Frequency::Weekly => week_number,
            Frequency::Monthly => now.month(),
        };
        let index = (period.max(1) as usize - 1) % total;
        let text = match builtins.get(index) {
            Some(quote) => quote.to_string(),
            None => {
                let q = &custom[index - builtins.len()];
                format!("{} - {}", q.text, q.author)
            }
        };

        Some(SelectedQuote {
            text,
            week_number,
            index,
            is_custom: index >= builtins.len(),
        })
    }

    fn pool(&self) -> (&'a [&'static str], &'a [CustomQuote]) {
        let custom: &'a [CustomQuote] = if self.settings.enable_custom_quotes {
            self.custom_quotes
        } else {
            &[]
        };
        if self.settings.custom_quotes_only && !custom.is_empty() {
            (&[], custom)
        } else {
            (self.builtins, custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::entities::CustomQuoteId;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn custom(text: &str, author: &str) -> CustomQuote {
        CustomQuote {
            id: CustomQuoteId::from(text),
            text: text.to_string(),
            author: author.to_string(),
            date_added: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn week_number_follows_jan_1_weekday() {
        // 2023-01-01 was a Sunday, 2022-01-01 a Saturday.
        assert_eq!(week_number(at("2023-01-01 00:00")), 1);
        assert_eq!(week_number(at("2023-01-07 00:00")), 1);
        assert_eq!(week_number(at("2023-01-08 00:00")), 2);
        assert_eq!(week_number(at("2022-01-01 00:00")), 1);
        assert_eq!(week_number(at("2022-01-02 00:00")), 2);
    }

    #[test]
    fn week_number_counts_time_of_day() {
        // Past midnight on the last day of a week already counts as the next.
        assert_eq!(week_number(at("2023-01-07 23:00")), 2);
        assert_eq!(week_number(at("2022-01-01 12:00")), 2);
    }

    #[test]
    fn last_days_of_year_can_be_week_53() {
        assert_eq!(week_number(at("2023-12-31 12:00")), 53);
        assert_eq!(week_number(at("2024-01-01 12:00")), 1);
    }

    #[test]
    fn first_week_selects_first_builtin_and_wraps() {
        let builtins = ["a", "b", "c"];
        let settings = QuoteSettings::default();
        let rotator = QuoteRotator::with_builtins(&builtins, &[], &settings);

        let week_1 = rotator.select(at("2023-01-02 08:00")).unwrap();
        assert_eq!(week_1.week_number, 1);
        assert_eq!(week_1.index, 0);
        assert_eq!(week_1.text, "a");
        assert!(!week_1.is_custom);

        // Week 4 = N + 1 wraps around to the first quote.
        let week_4 = rotator.select(at("2023-01-22 08:00")).unwrap();
        assert_eq!(week_4.week_number, 4);
        assert_eq!(week_4.index, 0);
    }

    #[test]
    fn custom_quotes_follow_builtins() {
        let builtins = ["a", "b"];
        let quotes = vec![custom("Stay the course", "Jack Bogle")];
        let settings = QuoteSettings::default();
        let rotator = QuoteRotator::with_builtins(&builtins, &quotes, &settings);
        let week_3 = rotator.select(at("2023-01-15 08:00")).unwrap();
        assert_eq!(week_3.index, 2);
        assert!(week_3.is_custom);
        assert_eq!(week_3.text, "Stay the course - Jack Bogle");
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let settings = QuoteSettings::default();
        let rotator = QuoteRotator::with_builtins(&[], &[], &settings);
        assert_eq!(rotator.select(at("2023-05-05 10:00")), None);
    }

    #[test]
    fn settings_shape_the_pool() {
        let builtins = ["a", "b"];
        let quotes = vec![custom("Mine", "Me")];

        let disabled = QuoteSettings {
            enable_custom_quotes: false,
            ..Default::default()
        };
        let pick = QuoteRotator::with_builtins(&builtins, &quotes, &disabled)
            .select(at("2023-01-15 08:00"))
            .unwrap();
        assert_eq!(pick.text, "a");

        let only_custom = QuoteSettings {
            custom_quotes_only: true,
            ..Default::default()
        };
        let pick = QuoteRotator::with_builtins(&builtins, &quotes, &only_custom)
            .select(at("2023-01-15 08:00"))
            .unwrap();
        assert!(pick.is_custom);
        assert_eq!(pick.text, "Mine - Me");

        // Falls back to the built-ins when there are no custom quotes.
        let pick = QuoteRotator::with_builtins(&builtins, &[], &only_custom)
            .select(at("2023-01-15 08:00"))
            .unwrap();
        assert!(!pick.is_custom);
    }

    #[test]
    fn daily_and_monthly_rotation() {
        let builtins = ["a", "b", "c"];
        let daily = QuoteSettings {
            change_frequency: Frequency::Daily,
            ..Default::default()
        };
        let pick = QuoteRotator::with_builtins(&builtins, &[], &daily)
            .select(at("2023-01-05 08:00"))
            .unwrap();
        assert_eq!(pick.index, 1);

        let monthly = QuoteSettings {
            change_frequency: Frequency::Monthly,
            ..Default::default()
        };
        let pick = QuoteRotator::with_builtins(&builtins, &[], &monthly)
            .select(at("2023-03-20 08:00"))
            .unwrap();
        assert_eq!(pick.index, 2);
    }

    #[test]
    fn builtin_pool_covers_a_year() {
        assert_eq!(BUILTIN_QUOTES.len(), 52);
        let first = QuoteRotator::new(&[], &QuoteSettings::default())
            .select(at("2023-01-03 09:00"))
            .unwrap();
        assert_eq!(first.text, BUILTIN_QUOTES[0]);
    }

    #[test]
    fn savings_tip_rotates_daily() {
        let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(savings_tip(jan_1), SAVINGS_TIPS[0]);
        assert_eq!(savings_tip(jan_1.succ_opt().unwrap()), SAVINGS_TIPS[1]);
    }
}
