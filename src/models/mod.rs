pub mod booking_model;
pub mod cinema_model;
pub mod hall_model;
pub mod instructor_model;
pub mod movie_model;
pub mod screening_model;

pub use booking_model::{Booking, BookingRequest};
pub use cinema_model::{Cinema, CinemaUpdate};
pub use hall_model::{Hall, HallUpdate};
pub use instructor_model::{Instructor, InstructorUpdate};
pub use movie_model::{Genre, Movie, MovieUpdate};
pub use screening_model::{Screening, ScreeningUpdate};
