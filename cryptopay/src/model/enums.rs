//! String-valued enumerations used across the Crypto Pay API.
//!
//! The API keeps adding assets, fiat currencies and statuses. Every enum here
//! has a catch-all `Other(String)` variant, so a value this crate does not
//! know yet decodes as raw text instead of failing the whole record.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value not known to this version of the crate.
            Other(String),
        }

        impl $name {
            /// All known variants, in declaration order.
            pub const KNOWN: &'static [Self] = &[$( Self::$variant ),+];

            /// Returns the wire representation.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            /// Returns `true` if the value is not one of the known variants.
            #[must_use]
            pub const fn is_other(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

string_enum! {
    /// Cryptocurrency codes accepted by the API.
    Asset {
        /// Tether.
        Usdt => "USDT",
        /// Toncoin.
        Ton => "TON",
        /// Bitcoin.
        Btc => "BTC",
        /// Ether.
        Eth => "ETH",
        /// Litecoin.
        Ltc => "LTC",
        /// BNB.
        Bnb => "BNB",
        /// Tron.
        Trx => "TRX",
        /// USD Coin.
        Usdc => "USDC",
        /// Binance USD, kept for historical records.
        Busd => "BUSD",
        /// Testnet-only jetton.
        Jet => "JET",
    }
}

string_enum! {
    /// Fiat currency codes used for pricing and exchange rates.
    Fiat {
        /// US dollar.
        Usd => "USD",
        /// Euro.
        Eur => "EUR",
        /// Russian ruble.
        Rub => "RUB",
        /// Belarusian ruble.
        Byn => "BYN",
        /// Ukrainian hryvnia.
        Uah => "UAH",
        /// Pound sterling.
        Gbp => "GBP",
        /// Chinese yuan.
        Cny => "CNY",
        /// Kazakhstani tenge.
        Kzt => "KZT",
        /// Uzbekistani som.
        Uzs => "UZS",
        /// Georgian lari.
        Gel => "GEL",
        /// Turkish lira.
        Try => "TRY",
        /// Armenian dram.
        Amd => "AMD",
        /// Thai baht.
        Thb => "THB",
        /// Indian rupee.
        Inr => "INR",
        /// Brazilian real.
        Brl => "BRL",
        /// Indonesian rupiah.
        Idr => "IDR",
        /// Azerbaijani manat.
        Azn => "AZN",
        /// UAE dirham.
        Aed => "AED",
        /// Polish zloty.
        Pln => "PLN",
        /// Israeli shekel.
        Ils => "ILS",
    }
}

string_enum! {
    /// Button shown to the payer once an invoice is paid.
    PaidButton {
        /// "View Item".
        ViewItem => "viewItem",
        /// "View Channel".
        OpenChannel => "openChannel",
        /// "Open Bot".
        OpenBot => "openBot",
        /// "Return".
        Callback => "callback",
    }
}

string_enum! {
    /// Lifecycle status of an invoice.
    ///
    /// An invoice moves from `active` to either `paid` or `expired`, never back.
    InvoiceStatus {
        /// Waiting for payment.
        Active => "active",
        /// Paid by a user.
        Paid => "paid",
        /// Expired before payment.
        Expired => "expired",
    }
}

string_enum! {
    /// Lifecycle status of a check.
    CheckStatus {
        /// Not activated yet.
        Active => "active",
        /// Activated by a user.
        Activated => "activated",
    }
}

string_enum! {
    /// How an invoice is priced.
    CurrencyType {
        /// Priced in a cryptocurrency asset.
        Crypto => "crypto",
        /// Priced in a fiat currency, paid in one of the accepted assets.
        Fiat => "fiat",
    }
}

string_enum! {
    /// Kind of webhook update.
    UpdateType {
        /// An invoice was paid.
        InvoicePaid => "invoice_paid",
    }
}
