pub use bookings::{Booking, BookingStatus};
pub use campaigns::{Campaign, CampaignStatus};
pub use commands::{
    BookingPatch, CampaignPatch, CustomerPatch, EventPatch, FacilitatorPatch, NewBooking,
    NewCampaign, NewCustomer, NewEvent, NewFacilitator, NewInvoice, NewPayment, NewPurchaseOrder,
    NewSession, PaymentPatch, SessionPatch,
};
pub use currency::Currency;
pub use docnum::DocumentKind;
pub use error::EngineError;
pub use event_sessions::{EventSession, SessionStatus};
pub use events::{Event, EventStatus};
pub use facilitators::Facilitator;
pub use invoices::{DocumentStatus, Invoice};
pub use money::Money;
pub use ops::{
    CustomerTotals, Engine, EngineBuilder, FinancialData, FinancialSummary, MonthlyRevenue,
    SeasonTotals, ServiceRevenue,
};
pub use payments::{Payment, PaymentTarget};
pub use purchase_orders::PurchaseOrder;
pub use users::{Role, User};

mod bookings;
mod campaigns;
mod commands;
mod currency;
mod docnum;
mod error;
mod event_sessions;
mod events;
mod facilitators;
mod invoices;
mod money;
mod ops;
mod payments;
mod purchase_orders;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
