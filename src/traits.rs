use crate::task::TaskId;

pub trait Indexable {
  fn id(&self) -> TaskId;
}
