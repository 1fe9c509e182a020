/// One step as seen by a learner.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S, A> {
    pub state: S,
    pub action: A,
    pub next_state: S,
    pub reward: f32,
    pub done: bool,
}

pub trait Environment
where
    Self::State: Clone + Into<Vec<f32>>,
    Self::Action: Clone,
{
    type State;
    type Action;
    type Error;

    fn reset(&mut self) -> Result<Self::State, Self::Error>;
    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<Transition<Self::State, Self::Action>, Self::Error>;
    fn render(&self) -> Result<String, Self::Error>;
    fn get_action_mask(&self) -> Vec<bool>;

    fn all_actions() -> Vec<Self::Action>;
    fn action_to_index(action: &Self::Action) -> usize;
}
