mod app_bar;
mod confirm_dialog;
mod gradient_background;
mod gradient_card;
mod notice_banner;

pub use app_bar::AppBar;
pub use confirm_dialog::ConfirmDialog;
pub use gradient_background::GradientBackground;
pub use gradient_card::GradientCard;
pub use notice_banner::NoticeBanner;
